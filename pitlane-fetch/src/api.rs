//! Typed queries against the statistics API.
//!
//! [`F1Api`] maps each query onto a [`Resource`], fetches it through the
//! [`ResilientFetcher`] and unwraps the response envelope.

use pitlane_core::{
    ConstructorResponse, ConstructorTeam, Driver, DriverResponse, Race, RaceCalendar,
    RaceResponse, RankedDriver, Resource, Season, StandingEntry, StandingsResponse, find_standing,
    rank_drivers,
};
use tracing::{debug, instrument, warn};

use crate::error::FetchFailure;
use crate::fetcher::ResilientFetcher;

/// Query surface used by the presentation layer.
#[derive(Debug, Clone)]
pub struct F1Api {
    fetcher: ResilientFetcher,
}

impl F1Api {
    /// Wraps a fetcher.
    pub fn new(fetcher: ResilientFetcher) -> Self {
        Self { fetcher }
    }

    /// The underlying fetcher.
    pub fn fetcher(&self) -> &ResilientFetcher {
        &self.fetcher
    }

    // ========================================================================
    // Single resources
    // ========================================================================

    /// Drivers entered in `season`, in API order.
    ///
    /// # Errors
    ///
    /// Returns [`FetchFailure`] when every attempt failed.
    pub async fn drivers(&self, season: Season) -> Result<Vec<Driver>, FetchFailure> {
        let response: DriverResponse = self
            .fetcher
            .fetch_resource(&Resource::Drivers(season))
            .await?;
        Ok(response.into_drivers())
    }

    /// Driver championship standings for `season`.
    ///
    /// # Errors
    ///
    /// Returns [`FetchFailure`] when every attempt failed.
    pub async fn driver_standings(
        &self,
        season: Season,
    ) -> Result<Vec<StandingEntry>, FetchFailure> {
        let response: StandingsResponse = self
            .fetcher
            .fetch_resource(&Resource::DriverStandings(season))
            .await?;
        Ok(response.into_standings())
    }

    /// One driver of the current season, if the API knows it.
    ///
    /// # Errors
    ///
    /// Returns [`FetchFailure`] when every attempt failed.
    pub async fn driver(&self, driver_id: &str) -> Result<Option<Driver>, FetchFailure> {
        let response: DriverResponse = self
            .fetcher
            .fetch_resource(&Resource::Driver(driver_id.to_string()))
            .await?;
        Ok(response.into_drivers().into_iter().next())
    }

    /// Constructors entered in `season`.
    ///
    /// # Errors
    ///
    /// Returns [`FetchFailure`] when every attempt failed.
    pub async fn constructors(
        &self,
        season: Season,
    ) -> Result<Vec<ConstructorTeam>, FetchFailure> {
        let response: ConstructorResponse = self
            .fetcher
            .fetch_resource(&Resource::Constructors(season))
            .await?;
        Ok(response.into_constructors())
    }

    /// The race calendar of `season`, ordered by round.
    ///
    /// # Errors
    ///
    /// Returns [`FetchFailure`] when every attempt failed.
    pub async fn race_calendar(&self, season: Season) -> Result<RaceCalendar, FetchFailure> {
        let response: RaceResponse = self
            .fetcher
            .fetch_resource(&Resource::RaceCalendar(season))
            .await?;
        Ok(RaceCalendar::new(response.into_races()))
    }

    /// One race of the current season by round.
    ///
    /// # Errors
    ///
    /// Returns [`FetchFailure`] when every attempt failed.
    pub async fn race(&self, round: u32) -> Result<Option<Race>, FetchFailure> {
        let response: RaceResponse = self.fetcher.fetch_resource(&Resource::Race(round)).await?;
        Ok(response.into_races().into_iter().find(|race| race.round == round))
    }

    // ========================================================================
    // Composite queries
    // ========================================================================

    /// Drivers of `season` merged with their standings.
    ///
    /// Both resources are fetched concurrently. Ranked drivers come first by
    /// position; drivers without a standing follow in API order.
    ///
    /// # Errors
    ///
    /// Returns the first [`FetchFailure`] if either fetch failed.
    #[instrument(skip(self), fields(season = %season))]
    pub async fn ranked_drivers(&self, season: Season) -> Result<Vec<RankedDriver>, FetchFailure> {
        let (drivers, standings) =
            futures::try_join!(self.drivers(season), self.driver_standings(season))?;
        debug!(
            drivers = drivers.len(),
            standings = standings.len(),
            "Merging standings"
        );
        Ok(rank_drivers(drivers, &standings))
    }

    /// One driver together with their current standing.
    ///
    /// A failed standings fetch only drops the ranking; the driver is still
    /// returned.
    ///
    /// # Errors
    ///
    /// Returns [`FetchFailure`] if the driver fetch failed.
    #[instrument(skip(self))]
    pub async fn driver_profile(
        &self,
        driver_id: &str,
    ) -> Result<Option<RankedDriver>, FetchFailure> {
        let standings = async {
            let standings = self
                .driver_standings(Season::Current)
                .await
                .unwrap_or_else(|failure| {
                    warn!(error = %failure, "Standings unavailable, profile left unranked");
                    Vec::new()
                });
            Ok::<_, FetchFailure>(standings)
        };
        let (driver, standings) = futures::try_join!(self.driver(driver_id), standings)?;

        Ok(driver.map(|driver| {
            let ranking = find_standing(&standings, &driver.driver_id).map(Into::into);
            RankedDriver { driver, ranking }
        }))
    }

    /// One race of any season, picked out of that season's calendar.
    ///
    /// The current season goes through the single-race resource; other
    /// seasons fetch the calendar and select the round.
    ///
    /// # Errors
    ///
    /// Returns [`FetchFailure`] when every attempt failed.
    pub async fn calendar_race(
        &self,
        season: Season,
        round: u32,
    ) -> Result<Option<Race>, FetchFailure> {
        if season.is_current() {
            return self.race(round).await;
        }
        let calendar = self.race_calendar(season).await?;
        Ok(calendar.round(round).cloned())
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use super::*;
    use crate::host::{RawResponse, StubTransport};

    const BASE: &str = "https://api.test/f1";

    const VERSTAPPEN: &str = r#"{"MRData":{"DriverTable":{"Drivers":[{"driverId":"max_verstappen","givenName":"Max","familyName":"Verstappen","nationality":"Dutch"}]}}}"#;

    const DRIVERS: &str = r#"{"MRData":{"DriverTable":{"season":"2024","Drivers":[
        {"driverId":"alonso","givenName":"Fernando","familyName":"Alonso","nationality":"Spanish"},
        {"driverId":"max_verstappen","givenName":"Max","familyName":"Verstappen","nationality":"Dutch"},
        {"driverId":"bearman","givenName":"Oliver","familyName":"Bearman","nationality":"British"}
    ]}}}"#;

    const STANDINGS: &str = r#"{"MRData":{"StandingsTable":{"season":"2024","StandingsLists":[{"season":"2024","round":"24","DriverStandings":[
        {"position":"1","points":"437","wins":"9","Driver":{"driverId":"max_verstappen"}},
        {"position":"2","points":"70","wins":"0","Driver":{"driverId":"alonso"}}
    ]}]}}}"#;

    const CALENDAR: &str = r#"{"MRData":{"RaceTable":{"season":"2023","Races":[
        {"season":"2023","round":"3","raceName":"Australian Grand Prix","url":"u3","Circuit":{"circuitId":"albert_park","circuitName":"Albert Park Grand Prix Circuit","Location":{"locality":"Melbourne","country":"Australia"}},"date":"2023-04-02"},
        {"season":"2023","round":"1","raceName":"Bahrain Grand Prix","url":"u1","Circuit":{"circuitId":"bahrain","circuitName":"Bahrain International Circuit","Location":{"locality":"Sakhir","country":"Bahrain"}},"date":"2023-03-05"},
        {"season":"2023","round":"2","raceName":"Saudi Arabian Grand Prix","url":"u2","Circuit":{"circuitId":"jeddah","circuitName":"Jeddah Corniche Circuit","Location":{"locality":"Jeddah","country":"Saudi Arabia"}},"date":"2023-03-19"}
    ]}}}"#;

    fn api(stub: &Arc<StubTransport>) -> F1Api {
        let fetcher = ResilientFetcher::builder()
            .base_url(BASE)
            .transport(stub.clone())
            .build()
            .unwrap();
        F1Api::new(fetcher)
    }

    #[tokio::test]
    async fn test_single_driver_stub() {
        let stub = Arc::new(StubTransport::new().then_ok(VERSTAPPEN));

        let driver = api(&stub).driver("max_verstappen").await.unwrap().unwrap();

        assert_eq!(driver.driver_id, "max_verstappen");
        assert_eq!(driver.given_name, "Max");
        assert_eq!(driver.family_name, "Verstappen");
        assert_eq!(driver.nationality, "Dutch");
        assert_eq!(
            stub.requests(),
            vec![format!("{BASE}/current/drivers/max_verstappen.json")]
        );
    }

    #[tokio::test]
    async fn test_ranked_drivers_merges_both_resources() {
        let stub = Arc::new(
            StubTransport::new()
                .route("/2024/drivers.json", Ok(RawResponse::ok(DRIVERS)))
                .route(
                    "/2024/driverStandings.json",
                    Ok(RawResponse::ok(STANDINGS)),
                ),
        );

        let ranked = api(&stub).ranked_drivers(Season::Year(2024)).await.unwrap();

        let ids: Vec<_> = ranked.iter().map(|r| r.driver.driver_id.as_str()).collect();
        assert_eq!(ids, ["max_verstappen", "alonso", "bearman"]);
        assert!(ranked[2].is_unranked());
        assert_eq!(stub.calls(), 2);
    }

    #[tokio::test]
    async fn test_ranked_drivers_fails_when_standings_fail() {
        let stub = Arc::new(
            StubTransport::new()
                .route("/drivers.json", Ok(RawResponse::ok(DRIVERS)))
                .route(
                    "/driverStandings.json",
                    Ok(RawResponse::new(500, "")),
                ),
        );

        let failure = api(&stub)
            .ranked_drivers(Season::Current)
            .await
            .unwrap_err();

        assert_eq!(failure.path, "/current/driverStandings.json");
        assert_eq!(failure.attempts, 3);
    }

    #[tokio::test]
    async fn test_driver_profile_without_standing() {
        let stub = Arc::new(
            StubTransport::new()
                .route("/drivers/bearman.json", Ok(RawResponse::ok(
                    r#"{"MRData":{"DriverTable":{"Drivers":[{"driverId":"bearman","givenName":"Oliver","familyName":"Bearman","nationality":"British","permanentNumber":"87"}]}}}"#,
                )))
                .route("/current/driverStandings.json", Ok(RawResponse::ok(STANDINGS))),
        );

        let profile = api(&stub).driver_profile("bearman").await.unwrap().unwrap();

        assert_eq!(profile.driver.permanent_number, Some(87));
        assert!(profile.is_unranked());
    }

    #[tokio::test]
    async fn test_driver_profile_survives_standings_failure() {
        let stub = Arc::new(
            StubTransport::new()
                .route("/drivers/bearman.json", Ok(RawResponse::ok(
                    r#"{"MRData":{"DriverTable":{"Drivers":[{"driverId":"bearman","givenName":"Oliver","familyName":"Bearman","nationality":"British"}]}}}"#,
                )))
                .route("/current/driverStandings.json", Ok(RawResponse::new(503, ""))),
        );

        let profile = api(&stub).driver_profile("bearman").await.unwrap().unwrap();

        assert_eq!(profile.driver.driver_id, "bearman");
        assert!(profile.is_unranked());
        assert_eq!(stub.calls(), 4);
    }

    #[tokio::test]
    async fn test_driver_profile_fails_when_driver_fails() {
        let stub = Arc::new(
            StubTransport::new()
                .route("/drivers/bearman.json", Ok(RawResponse::new(404, "")))
                .route("/current/driverStandings.json", Ok(RawResponse::ok(STANDINGS))),
        );

        let failure = api(&stub).driver_profile("bearman").await.unwrap_err();

        assert_eq!(failure.path, "/current/drivers/bearman.json");
    }

    #[tokio::test]
    async fn test_unknown_driver_is_none() {
        let stub = Arc::new(
            StubTransport::new()
                .route("/drivers/nobody.json", Ok(RawResponse::ok(
                    r#"{"MRData":{"DriverTable":{"Drivers":[]}}}"#,
                )))
                .route("/driverStandings.json", Ok(RawResponse::ok(STANDINGS))),
        );

        assert!(api(&stub).driver_profile("nobody").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_calendar_race_selects_round() {
        let stub = Arc::new(StubTransport::new().then_ok(CALENDAR));

        let race = api(&stub)
            .calendar_race(Season::Year(2023), 2)
            .await
            .unwrap()
            .unwrap();

        assert_eq!(race.round, 2);
        assert_eq!(race.race_name, "Saudi Arabian Grand Prix");
        assert_eq!(stub.requests(), vec![format!("{BASE}/2023.json")]);
    }

    #[tokio::test]
    async fn test_calendar_is_ordered_by_round() {
        let stub = Arc::new(StubTransport::new().then_ok(CALENDAR));

        let calendar = api(&stub).race_calendar(Season::Year(2023)).await.unwrap();

        let rounds: Vec<_> = calendar.races().iter().map(|r| r.round).collect();
        assert_eq!(rounds, [1, 2, 3]);
    }

    #[tokio::test]
    async fn test_race_missing_round_is_none() {
        let stub = Arc::new(
            StubTransport::new().then_ok(r#"{"MRData":{"RaceTable":{"season":"2024","round":"40","Races":[]}}}"#),
        );

        assert!(api(&stub).race(40).await.unwrap().is_none());
        assert_eq!(stub.requests(), vec![format!("{BASE}/current/40.json")]);
    }

    #[tokio::test]
    async fn test_constructors() {
        let stub = Arc::new(StubTransport::new().then_ok(
            r#"{"MRData":{"ConstructorTable":{"Constructors":[{"constructorId":"ferrari","name":"Ferrari","nationality":"Italian","url":"http://en.wikipedia.org/wiki/Scuderia_Ferrari"}]}}}"#,
        ));

        let teams = api(&stub).constructors(Season::Current).await.unwrap();

        assert_eq!(teams.len(), 1);
        assert_eq!(teams[0].name, "Ferrari");
        assert_eq!(stub.requests(), vec![format!("{BASE}/current/constructors.json")]);
    }
}
