//! Registry: validates definitions, creates swipers and hands out ids.

use hashbrown::HashMap;
use log::{debug, warn};

use crate::config::Config;
use crate::definition::{Runway, SwiperDefinition};
use crate::error::SwiperError;
use crate::ids::{IdAllocator, SwiperId};
use crate::step::{StepBuilder, StepBuilderFactory};
use crate::swiper::Swiper;

/// Owner of every registered swiper. Insert-only; ids are never reused.
#[derive(Debug, Default)]
pub struct Registry {
    cfg: Config,
    ids: IdAllocator,
    swipers: HashMap<SwiperId, Swiper>,
}

impl Registry {
    pub fn new(cfg: Config) -> Self {
        Self {
            cfg,
            ids: IdAllocator::new(),
            swipers: HashMap::new(),
        }
    }

    pub fn config(&self) -> &Config {
        &self.cfg
    }

    /// Run `define` with a step builder factory and register what it returns.
    ///
    /// - `None` from `define`: nothing registered, `Ok(None)`.
    /// - empty runway: logged, nothing registered, `Ok(None)`.
    /// - fewer than two access entries: `Err(AccessTooShort)`.
    pub fn register<F>(&mut self, define: F) -> Result<Option<SwiperId>, SwiperError>
    where
        F: FnOnce(StepBuilderFactory) -> Option<SwiperDefinition>,
    {
        match define(StepBuilder::new) {
            Some(def) => self.register_definition(def),
            None => Ok(None),
        }
    }

    /// Register an already built (or parsed) definition.
    pub fn register_definition(
        &mut self,
        def: SwiperDefinition,
    ) -> Result<Option<SwiperId>, SwiperError> {
        let runway = match Runway::try_from(def) {
            Ok(runway) => runway,
            Err(SwiperError::EmptyRunway) => {
                warn!("swiper registration aborted: runway is empty");
                return Ok(None);
            }
            Err(err) => return Err(err),
        };
        let id = self.ids.alloc_swiper();
        debug!("registered {id} with {} runway slots", runway.len());
        self.swipers.insert(id, Swiper::new(id, runway, &self.cfg));
        Ok(Some(id))
    }

    /// Parse a JSON definition and register it.
    pub fn register_json(&mut self, json: &str) -> Result<Option<SwiperId>, SwiperError> {
        self.register_definition(SwiperDefinition::from_json(json)?)
    }

    pub fn lookup(&self, id: SwiperId) -> Option<&Swiper> {
        self.swipers.get(&id)
    }

    pub fn lookup_mut(&mut self, id: SwiperId) -> Option<&mut Swiper> {
        self.swipers.get_mut(&id)
    }

    pub fn len(&self) -> usize {
        self.swipers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.swipers.is_empty()
    }

    /// Advance every swiper's auto-play clock by `dt_ms`. Returns the total
    /// number of advances fired.
    pub fn update(&mut self, dt_ms: u32) -> usize {
        self.swipers.values_mut().map(|s| s.update(dt_ms)).sum()
    }
}
