//! Swiper definitions and the runway they resolve into.

use log::debug;
use serde::{Deserialize, Serialize};

use crate::error::SwiperError;
use crate::port::Port;
use crate::step::{Step, StepOverrides};

/// Ordered steps that move an item into one port.
pub type StepSequence = Vec<Step>;

/// Declarative description of a swiper, as returned by a definition
/// factory or parsed from JSON.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SwiperDefinition {
    /// One step sequence per visible slot.
    pub runway: Vec<StepSequence>,
    /// `[startPort, endPort]`; further entries are ignored.
    #[serde(default)]
    pub access: Vec<StepSequence>,
    #[serde(default)]
    pub sleep: StepSequence,
    /// Initial left rotation of the item order.
    #[serde(default)]
    pub begin_from: usize,
}

impl SwiperDefinition {
    pub fn from_json(s: &str) -> Result<Self, SwiperError> {
        Ok(serde_json::from_str(s)?)
    }

    /// Registration checks, in the order they are applied: an empty runway
    /// first, then the access pair.
    pub fn validate(&self) -> Result<(), SwiperError> {
        if self.runway.is_empty() {
            return Err(SwiperError::EmptyRunway);
        }
        if self.access.len() < 2 {
            return Err(SwiperError::AccessTooShort {
                len: self.access.len(),
            });
        }
        Ok(())
    }
}

/// Validated port table of a swiper.
#[derive(Clone, Debug, PartialEq)]
pub struct Runway {
    slots: Vec<StepSequence>,
    start_port: StepSequence,
    end_port: StepSequence,
    sleep: StepSequence,
    begin_from: usize,
}

impl TryFrom<SwiperDefinition> for Runway {
    type Error = SwiperError;

    fn try_from(def: SwiperDefinition) -> Result<Self, Self::Error> {
        def.validate()?;
        let mut access = def.access.into_iter();
        let (Some(start_port), Some(end_port)) = (access.next(), access.next()) else {
            return Err(SwiperError::AccessTooShort { len: 0 });
        };
        Ok(Self {
            slots: def.runway,
            start_port,
            end_port,
            sleep: def.sleep,
            begin_from: def.begin_from,
        })
    }
}

impl Runway {
    /// Number of visible slots.
    pub fn len(&self) -> usize {
        self.slots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    pub fn begin_from(&self) -> usize {
        self.begin_from
    }

    /// Steps of a port; empty for `Stick` and for slots past the runway.
    pub fn steps(&self, port: Port) -> &[Step] {
        match port {
            Port::Slot(i) => self.slots.get(i).map(Vec::as_slice).unwrap_or(&[]),
            Port::StartPort => &self.start_port,
            Port::EndPort => &self.end_port,
            Port::Sleep => &self.sleep,
            Port::Stick => &[],
        }
    }

    /// `[startPort] + runway + [endPort]`.
    pub fn chain(&self) -> impl Iterator<Item = &StepSequence> {
        std::iter::once(&self.start_port)
            .chain(self.slots.iter())
            .chain(std::iter::once(&self.end_port))
    }

    /// Sync every step's defaults with `options`. Returns true when at
    /// least one step actually changed. Sleep steps share the defaults of
    /// the chain and are updated with it.
    pub fn apply_defaults(&mut self, options: &StepOverrides) -> bool {
        let mut changed = false;
        let sequences = std::iter::once(&mut self.start_port)
            .chain(self.slots.iter_mut())
            .chain(std::iter::once(&mut self.end_port))
            .chain(std::iter::once(&mut self.sleep));
        for step in sequences.flatten() {
            if options.differs_from(&step.defaults) {
                step.defaults.apply(options);
                changed = true;
            }
        }
        if changed {
            debug!("step defaults updated: {options:?}");
        }
        changed
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::step::{StepBuilder, StepOptions};

    fn seq(px: i32) -> StepSequence {
        let mut b = StepBuilder::new(StepOptions::default());
        b.translate_x(px).step(StepOverrides::default());
        b.export()
    }

    fn def(slots: usize, access: usize) -> SwiperDefinition {
        SwiperDefinition {
            runway: (0..slots).map(|i| seq(i as i32 * 100)).collect(),
            access: (0..access).map(|i| seq(-100 - i as i32)).collect(),
            sleep: seq(0),
            begin_from: 0,
        }
    }

    #[test]
    fn empty_runway_is_reported_before_access() {
        assert_eq!(def(0, 0).validate(), Err(SwiperError::EmptyRunway));
        assert_eq!(
            def(2, 1).validate(),
            Err(SwiperError::AccessTooShort { len: 1 })
        );
        assert!(def(2, 2).validate().is_ok());
    }

    #[test]
    fn chain_wraps_runway_with_access_ports() {
        let runway = Runway::try_from(def(3, 2)).unwrap();
        assert_eq!(runway.chain().count(), 5);
        assert_eq!(runway.steps(Port::StartPort), seq(-100).as_slice());
        assert_eq!(runway.steps(Port::EndPort), seq(-101).as_slice());
        assert!(runway.steps(Port::Slot(9)).is_empty());
        assert!(runway.steps(Port::Stick).is_empty());
    }

    #[test]
    fn apply_defaults_reports_real_changes_only() {
        let mut runway = Runway::try_from(def(2, 2)).unwrap();
        let same = StepOverrides {
            duration: Some(400),
            ..StepOverrides::default()
        };
        assert!(!runway.apply_defaults(&same));

        let slower = StepOverrides {
            duration: Some(600),
            ..StepOverrides::default()
        };
        assert!(runway.apply_defaults(&slower));
        assert_eq!(runway.steps(Port::Slot(1))[0].resolve().duration, 600);
        assert_eq!(runway.steps(Port::Sleep)[0].resolve().duration, 600);
        assert!(!runway.apply_defaults(&slower));
    }
}
