//! Session-scoped dashboard state
//!
//! A [`Session`] owns the configuration, the RNG and the current dataset
//! snapshot. The snapshot is only ever replaced as a whole; a failed upload
//! leaves the previous one untouched.

use crate::config::DashboardConfig;
use crate::dataset::{Dataset, Origin};
use crate::error::DashboardResult;
use crate::generator::{generate_dataset, session_rng, synthesize_facts};
use crate::io::read_partners;
use rand::rngs::StdRng;
use std::io::Read;
use tracing::info;

pub struct Session {
    config: DashboardConfig,
    rng: StdRng,
    dataset: Dataset,
    generation: u64,
}

impl Session {
    /// Start a session with a freshly generated dataset
    pub fn create(config: DashboardConfig) -> Self {
        let mut rng = session_rng(config.generator.seed);
        let dataset = generate_dataset(&mut rng, &config.generator);
        info!(
            "Session created with {} generated partners",
            dataset.partners.len()
        );
        Session {
            config,
            rng,
            dataset,
            generation: 1,
        }
    }

    /// Start a session from an uploaded partner table. Fact tables are
    /// synthesized for the uploaded partners.
    pub fn from_upload<R: Read>(config: DashboardConfig, reader: R) -> DashboardResult<Self> {
        let partners = read_partners(reader)?;
        let mut rng = session_rng(config.generator.seed);
        let dataset = synthesize_facts(&mut rng, partners, &config.generator, Origin::Uploaded);
        info!(
            "Session created from upload with {} partners",
            dataset.partners.len()
        );
        Ok(Session {
            config,
            rng,
            dataset,
            generation: 1,
        })
    }

    /// Replace the current dataset with an uploaded partner table
    pub fn load_partners<R: Read>(&mut self, reader: R) -> DashboardResult<()> {
        let partners = read_partners(reader)?;
        self.dataset = synthesize_facts(&mut self.rng, partners, &self.config.generator, Origin::Uploaded);
        self.generation += 1;
        info!(
            "Loaded {} uploaded partners (generation {})",
            self.dataset.partners.len(),
            self.generation
        );
        Ok(())
    }

    /// Discard the current dataset and generate a new partner tree and facts
    pub fn regenerate(&mut self) {
        self.dataset = generate_dataset(&mut self.rng, &self.config.generator);
        self.generation += 1;
        info!(
            "Regenerated dataset with {} partners (generation {})",
            self.dataset.partners.len(),
            self.generation
        );
    }

    pub fn dataset(&self) -> &Dataset {
        &self.dataset
    }

    pub fn config(&self) -> &DashboardConfig {
        &self.config
    }

    /// Number of datasets this session has held, starting at 1
    pub fn generation(&self) -> u64 {
        self.generation
    }

    /// End the session, releasing the dataset
    pub fn destroy(self) {
        info!("Session destroyed after {} generation(s)", self.generation);
    }
}
