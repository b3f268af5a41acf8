//! Boolean feature flags offered by the project template

use serde::{Deserialize, Serialize};
use std::fmt;

/// A single optional feature of the generated project
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Feature {
    Git,
    Celery,
    CeleryBeat,
    Postgres,
    Pytest,
    Ruff,
    Black,
    Docker,
    Make,
    Nginx,
    Traefik,
}

impl Feature {
    /// Every feature, in the order the prompts ask for them
    pub const ALL: [Feature; 11] = [
        Feature::Git,
        Feature::Celery,
        Feature::CeleryBeat,
        Feature::Postgres,
        Feature::Pytest,
        Feature::Ruff,
        Feature::Black,
        Feature::Docker,
        Feature::Make,
        Feature::Nginx,
        Feature::Traefik,
    ];

    /// Key used in `template.yaml` defaults and in the template context
    pub fn key(&self) -> &'static str {
        match self {
            Feature::Git => "use_git",
            Feature::Celery => "use_celery",
            Feature::CeleryBeat => "use_celery_beat",
            Feature::Postgres => "use_postgres",
            Feature::Pytest => "use_pytest",
            Feature::Ruff => "use_ruff",
            Feature::Black => "use_black",
            Feature::Docker => "use_docker",
            Feature::Make => "use_make",
            Feature::Nginx => "use_nginx",
            Feature::Traefik => "use_traefik",
        }
    }

    pub fn display_name(&self) -> &'static str {
        match self {
            Feature::Git => "Git",
            Feature::Celery => "Celery",
            Feature::CeleryBeat => "Celery Beat",
            Feature::Postgres => "Postgres",
            Feature::Pytest => "Pytest",
            Feature::Ruff => "Ruff",
            Feature::Black => "Black",
            Feature::Docker => "Docker",
            Feature::Make => "Make",
            Feature::Nginx => "Nginx",
            Feature::Traefik => "Traefik",
        }
    }
}

impl fmt::Display for Feature {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.display_name())
    }
}

/// On/off state for every [`Feature`]
///
/// Field names double as the template context keys, so the struct can be
/// flattened straight into a `ProjectConfig` or a manifest `defaults` block.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Features {
    pub use_git: bool,
    pub use_celery: bool,
    pub use_celery_beat: bool,
    pub use_postgres: bool,
    pub use_pytest: bool,
    pub use_ruff: bool,
    pub use_black: bool,
    pub use_docker: bool,
    pub use_make: bool,
    pub use_nginx: bool,
    pub use_traefik: bool,
}

impl Default for Features {
    fn default() -> Self {
        Self {
            use_git: false,
            use_celery: false,
            use_celery_beat: false,
            use_postgres: true,
            use_pytest: true,
            use_ruff: true,
            use_black: true,
            use_docker: false,
            use_make: false,
            use_nginx: true,
            use_traefik: true,
        }
    }
}

impl Features {
    /// Every feature switched off
    pub fn none() -> Self {
        let mut features = Self::default();
        for feature in Feature::ALL {
            features.set(feature, false);
        }
        features
    }

    /// Every feature switched on
    pub fn all() -> Self {
        let mut features = Self::default();
        for feature in Feature::ALL {
            features.set(feature, true);
        }
        features
    }

    pub fn get(&self, feature: Feature) -> bool {
        match feature {
            Feature::Git => self.use_git,
            Feature::Celery => self.use_celery,
            Feature::CeleryBeat => self.use_celery_beat,
            Feature::Postgres => self.use_postgres,
            Feature::Pytest => self.use_pytest,
            Feature::Ruff => self.use_ruff,
            Feature::Black => self.use_black,
            Feature::Docker => self.use_docker,
            Feature::Make => self.use_make,
            Feature::Nginx => self.use_nginx,
            Feature::Traefik => self.use_traefik,
        }
    }

    pub fn set(&mut self, feature: Feature, enabled: bool) {
        let slot = match feature {
            Feature::Git => &mut self.use_git,
            Feature::Celery => &mut self.use_celery,
            Feature::CeleryBeat => &mut self.use_celery_beat,
            Feature::Postgres => &mut self.use_postgres,
            Feature::Pytest => &mut self.use_pytest,
            Feature::Ruff => &mut self.use_ruff,
            Feature::Black => &mut self.use_black,
            Feature::Docker => &mut self.use_docker,
            Feature::Make => &mut self.use_make,
            Feature::Nginx => &mut self.use_nginx,
            Feature::Traefik => &mut self.use_traefik,
        };
        *slot = enabled;
    }

    /// Features currently switched on, in prompt order
    pub fn enabled(&self) -> Vec<Feature> {
        Feature::ALL
            .into_iter()
            .filter(|feature| self.get(*feature))
            .collect()
    }
}
