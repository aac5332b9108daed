//! The companion session: the one place the current flight plan lives.
//!
//! Commands open a session, which reloads the last saved plan, and then
//! borrow the components they need from it. Every component built here
//! sees the same plan and the same ports.

use crate::atc::script::{render, Placeholders};
use crate::atc::sequencer::Sequencer;
use crate::cache::{BucketStore, CacheGateway, RoutingTable, CACHE_VERSION};
use crate::config::AppConfig;
use crate::context::ServiceContext;
use crate::dispatch::{DispatchClient, DispatchError};
use crate::flightplan::{Briefing, FlightPlan, FlightPlanStore, StoreError};
use crate::ports::clock::Clock;
use crate::speech::SpeechChannel;

/// Page-lifetime state shared by every command.
pub struct CompanionSession<'c> {
    ctx: &'c ServiceContext,
    config: &'c AppConfig,
    flight_plan: Option<FlightPlan>,
}

impl<'c> CompanionSession<'c> {
    /// Opens a session, restoring the saved flight plan if there is a
    /// readable one.
    #[must_use]
    pub fn open(ctx: &'c ServiceContext, config: &'c AppConfig) -> Self {
        let mut session = Self { ctx, config, flight_plan: None };
        session.flight_plan = session.store().load();
        session
    }

    /// The loaded flight plan.
    #[must_use]
    pub fn flight_plan(&self) -> Option<&FlightPlan> {
        self.flight_plan.as_ref()
    }

    /// The briefing for the loaded flight plan.
    #[must_use]
    pub fn briefing(&self) -> Option<Briefing> {
        self.flight_plan.as_ref().map(Briefing::from_plan)
    }

    /// The ports this session runs against.
    #[must_use]
    pub fn context(&self) -> &'c ServiceContext {
        self.ctx
    }

    /// The configuration this session was opened with.
    #[must_use]
    pub fn config(&self) -> &AppConfig {
        self.config
    }

    /// Persistence for the flight plan.
    #[must_use]
    pub fn store(&self) -> FlightPlanStore<'c> {
        FlightPlanStore::new(self.ctx.fs.as_ref(), &self.config.home)
    }

    /// The cache gateway every outbound request goes through.
    #[must_use]
    pub fn gateway(&self) -> CacheGateway<'c> {
        CacheGateway::new(
            self.ctx.http.as_ref(),
            BucketStore::new(
                self.ctx.fs.as_ref(),
                self.ctx.id_gen.as_ref(),
                self.ctx.clock.as_ref(),
                &self.config.cache_dir(),
            ),
            RoutingTable::standard(&self.config.dispatch_host()),
            CACHE_VERSION,
        )
    }

    /// The speech channel, on the configured voice or the engine's first.
    #[must_use]
    pub fn speech(&self) -> SpeechChannel<'c> {
        SpeechChannel::with_default_voice(self.ctx.speech.as_ref(), self.config.voice.clone())
    }

    /// A fresh ATC sequencer whose script reflects the loaded plan.
    #[must_use]
    pub fn sequencer(&self) -> Sequencer<'_> {
        self.sequencer_with(self.ctx.clock.as_ref(), self.speech())
    }

    /// Like [`Self::sequencer`], but timed against `clock` and speaking
    /// through `speech`.
    #[must_use]
    pub fn sequencer_with<'s>(&'s self, clock: &'s dyn Clock, speech: SpeechChannel<'s>) -> Sequencer<'s> {
        let script = render(&Placeholders::from_plan(self.flight_plan.as_ref()));
        Sequencer::new(script, clock, speech, self.ctx.transcript.as_ref())
    }

    /// Fetches the latest plan for `username`, saves it, and makes it current.
    ///
    /// A failure to save is logged; the plan is still loaded for this run.
    ///
    /// # Errors
    ///
    /// Returns the dispatch failure; the current plan is left untouched.
    pub async fn login(&mut self, username: &str) -> Result<&FlightPlan, DispatchError> {
        let gateway = self.gateway();
        let plan = DispatchClient::new(&gateway, self.config.dispatch_url.as_str())
            .fetch(username)
            .await?;

        if let Err(e) = self.store().save(&plan, username.trim()) {
            tracing::warn!(error = %e, "flight plan fetched but not saved");
        }
        Ok(&*self.flight_plan.insert(plan))
    }

    /// Forgets the current plan, in memory and on disk.
    ///
    /// # Errors
    ///
    /// Returns an error if the saved plan cannot be removed.
    pub fn logout(&mut self) -> Result<(), StoreError> {
        self.flight_plan = None;
        self.store().clear()
    }
}
