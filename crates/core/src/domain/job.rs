use serde::{Deserialize, Serialize};

/// Fixed enumeration of electrical work categories. Every category drives its
/// own default material set, scope narrative, and labour assumptions.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum JobType {
    Rewire,
    FuseBoxUpgrade,
    SocketInstallation,
    LightingInstallation,
    ElectricShower,
    ElectricCarCharger,
}

impl JobType {
    pub const ALL: [JobType; 6] = [
        JobType::Rewire,
        JobType::FuseBoxUpgrade,
        JobType::SocketInstallation,
        JobType::LightingInstallation,
        JobType::ElectricShower,
        JobType::ElectricCarCharger,
    ];

    /// Total mapping from a wire key to a job type. Unrecognized keys fall
    /// back to a full rewire, the most conservative default.
    pub fn from_key(key: &str) -> Self {
        match key.trim().to_ascii_lowercase().as_str() {
            "fuse-box-upgrade" => Self::FuseBoxUpgrade,
            "socket-installation" => Self::SocketInstallation,
            "lighting-installation" => Self::LightingInstallation,
            "electric-shower" => Self::ElectricShower,
            "electric-car-charger" => Self::ElectricCarCharger,
            _ => Self::Rewire,
        }
    }

    pub fn key(&self) -> &'static str {
        match self {
            Self::Rewire => "rewire",
            Self::FuseBoxUpgrade => "fuse-box-upgrade",
            Self::SocketInstallation => "socket-installation",
            Self::LightingInstallation => "lighting-installation",
            Self::ElectricShower => "electric-shower",
            Self::ElectricCarCharger => "electric-car-charger",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Self::Rewire => "Full or partial rewire",
            Self::FuseBoxUpgrade => "Fuse box upgrade",
            Self::SocketInstallation => "Socket installation",
            Self::LightingInstallation => "Lighting installation",
            Self::ElectricShower => "Electric shower installation",
            Self::ElectricCarCharger => "EV charge point installation",
        }
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PropertyType {
    #[default]
    House,
    Flat,
    Bungalow,
    Commercial,
}

impl PropertyType {
    pub fn key(&self) -> &'static str {
        match self {
            Self::House => "house",
            Self::Flat => "flat",
            Self::Bungalow => "bungalow",
            Self::Commercial => "commercial",
        }
    }
}

/// User-entered job context for one quote-drafting session. Bedroom and floor
/// counts stay string-encoded exactly as the user typed them; numeric
/// interpretation happens lazily with tolerant fallbacks.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct QuoteDraft {
    #[serde(default)]
    pub client_name: String,
    #[serde(default)]
    pub client_address: String,
    #[serde(default)]
    pub property_type: PropertyType,
    #[serde(default = "default_bedrooms")]
    pub bedrooms: String,
    #[serde(default = "default_floors")]
    pub floors: String,
    #[serde(default)]
    pub scope_of_work: Option<String>,
    #[serde(default)]
    pub additional_requirements: String,
}

fn default_bedrooms() -> String {
    "3".to_string()
}

fn default_floors() -> String {
    "1".to_string()
}

impl QuoteDraft {
    pub fn bedroom_count(&self) -> u32 {
        self.bedrooms.trim().parse().unwrap_or(3)
    }

    pub fn floor_count(&self) -> u32 {
        self.floors.trim().parse().unwrap_or(1)
    }

    pub fn has_client_name(&self) -> bool {
        !self.client_name.trim().is_empty()
    }

    /// User-authored scope override, if one was actually entered.
    pub fn scope_override(&self) -> Option<&str> {
        self.scope_of_work.as_deref().map(str::trim).filter(|scope| !scope.is_empty())
    }
}
