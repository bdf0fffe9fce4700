/// Static identity of one simulated operator SMSC.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct OperatorProfile {
    /// Selection key used on the command line (`roshan`, `mtn`, ...)
    pub key: String,

    /// Display name, also the prefix of every message id this operator issues
    pub name: String,

    /// TCP port the operator listens on
    pub port: u16,

    /// system_ids starting with this prefix (any case) are accepted
    pub system_id_prefix: String,

    /// MSISDN prefixes served by the operator. Informational only.
    pub number_prefixes: Vec<String>,

    /// Advertised throughput ceiling. Informational only, never enforced.
    pub max_tps: u32,

    /// Whether submitted messages get a delivery receipt
    pub receipts_enabled: bool,
}

impl OperatorProfile {
    pub fn new(key: &str, name: &str, port: u16, number_prefixes: &[&str], max_tps: u32) -> Self {
        OperatorProfile {
            key: key.to_string(),
            name: name.to_string(),
            port,
            system_id_prefix: key.to_string(),
            number_prefixes: number_prefixes.iter().map(|p| p.to_string()).collect(),
            max_tps,
            receipts_enabled: true,
        }
    }

    /// The five operators of the reference deployment, in port order.
    pub fn builtin() -> Vec<OperatorProfile> {
        vec![
            OperatorProfile::new("aftel", "AFTEL", 2775, &["93-20", "93-25"], 150),
            OperatorProfile::new("roshan", "Roshan", 2776, &["93-79", "93-77", "93-72"], 200),
            OperatorProfile::new("awcc", "AWCC", 2777, &["93-70", "93-71"], 150),
            OperatorProfile::new("mtn", "MTN", 2778, &["93-78", "93-76"], 180),
            OperatorProfile::new("salaam", "Salaam", 2779, &["93-74", "93-75"], 100),
        ]
    }

    /// Permissive credential check: the system_id starts with the operator's
    /// prefix or contains its name, ignoring case. Passwords are not checked.
    pub fn accepts(&self, system_id: &str) -> bool {
        let system_id = system_id.to_lowercase();
        system_id.starts_with(&self.system_id_prefix.to_lowercase())
            || system_id.contains(&self.name.to_lowercase())
    }
}
