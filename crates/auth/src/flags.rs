use serde::{Deserialize, Serialize};

/// Feature flags enabled for the signed-in operator.
///
/// Resolution happens server-side; the client only checks membership.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct FeatureFlags(Vec<String>);

impl FeatureFlags {
    pub fn new(flags: impl IntoIterator<Item = impl Into<String>>) -> Self {
        Self(flags.into_iter().map(Into::into).collect())
    }

    pub fn empty() -> Self {
        Self::default()
    }

    pub fn is_enabled(&self, name: &str) -> bool {
        self.0.iter().any(|flag| flag == name)
    }

    pub fn names(&self) -> &[String] {
        &self.0
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn membership_is_exact() {
        let flags: FeatureFlags =
            serde_json::from_str(r#"["vip_hub", "exchange_coach"]"#).unwrap();

        assert!(flags.is_enabled("vip_hub"));
        assert!(!flags.is_enabled("VIP_HUB"));
        assert!(!FeatureFlags::empty().is_enabled("vip_hub"));
    }
}
