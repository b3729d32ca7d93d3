/// Options applied when a context is built
#[derive(Debug, Clone)]
pub struct ContainerConfig {
    /// Allow an instance to fill its own dependency slots
    pub self_injection: bool,
    /// Report unresolved slots as warnings instead of debug messages
    pub warn_unresolved: bool,
}

impl ContainerConfig {
    pub fn with_self_injection(mut self, enabled: bool) -> Self {
        self.self_injection = enabled;
        self
    }

    pub fn with_warn_unresolved(mut self, enabled: bool) -> Self {
        self.warn_unresolved = enabled;
        self
    }
}

impl Default for ContainerConfig {
    fn default() -> Self {
        Self {
            self_injection: true,
            warn_unresolved: false,
        }
    }
}
