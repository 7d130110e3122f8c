/// Build metadata embedded by `build.rs`.
#[derive(Debug, Clone, Copy)]
pub struct BuildMetadata {
    pub version: &'static str,
    pub git_hash: &'static str,
    pub git_status: &'static str,
    pub timestamp: &'static str,
    pub target: &'static str,
    pub profile: &'static str,
    pub rustc: &'static str,
}

impl BuildMetadata {
    /// Label/value pairs in the order `version` prints them.
    pub fn rows(&self) -> [(&'static str, &'static str); 7] {
        [
            ("Version", self.version),
            ("Commit", self.git_hash),
            ("Tree", self.git_status),
            ("Built", self.timestamp),
            ("Target", self.target),
            ("Profile", self.profile),
            ("Rustc", self.rustc),
        ]
    }
}

pub fn current() -> BuildMetadata {
    BuildMetadata {
        version: env!("CARGO_PKG_VERSION"),
        git_hash: option_env!("TRIP_PLANNER_BUILD_HASH").unwrap_or("unknown"),
        git_status: option_env!("TRIP_PLANNER_BUILD_STATUS").unwrap_or("unknown"),
        timestamp: option_env!("TRIP_PLANNER_BUILD_TIMESTAMP").unwrap_or("unknown"),
        target: option_env!("TRIP_PLANNER_BUILD_TARGET").unwrap_or("unknown"),
        profile: option_env!("TRIP_PLANNER_BUILD_PROFILE").unwrap_or("unknown"),
        rustc: option_env!("TRIP_PLANNER_BUILD_RUSTC").unwrap_or("unknown"),
    }
}
