//! Integration tests for joining the driver list with the standings.

use pitlane_core::{DriverResponse, StandingsResponse, format::format_points, rank_drivers};

const DRIVERS: &str = r#"{"MRData":{"DriverTable":{"Drivers":[
    {"driverId":"alonso","givenName":"Fernando","familyName":"Alonso","nationality":"Spanish"},
    {"driverId":"bottas","givenName":"Valtteri","familyName":"Bottas","nationality":"Finnish"},
    {"driverId":"colapinto","givenName":"Franco","familyName":"Colapinto","nationality":"Argentine"}
]}}}"#;

const STANDINGS: &str = r#"{"MRData":{"StandingsTable":{"StandingsLists":[{"DriverStandings":[
    {"position":"1","points":"25","Driver":{"driverId":"bottas"}},
    {"position":"2","points":"18.5","Driver":{"driverId":"alonso"}}
]}]}}}"#;

#[test]
fn test_merge_from_api_payloads() {
    let drivers = serde_json::from_str::<DriverResponse>(DRIVERS).unwrap().into_drivers();
    let standings = serde_json::from_str::<StandingsResponse>(STANDINGS)
        .unwrap()
        .into_standings();

    let ranked = rank_drivers(drivers, &standings);
    let order: Vec<&str> = ranked.iter().map(|r| r.driver.driver_id.as_str()).collect();

    assert_eq!(order, vec!["bottas", "alonso", "colapinto"]);
    assert_eq!(format_points(ranked[1].ranking.unwrap().points), "18.5");
    assert!(ranked[2].ranking.is_none());
}
