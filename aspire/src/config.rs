use std::path::PathBuf;
use std::time::Duration;

/// Environment variable naming the solver executable
pub const SOLVER_ENV_VAR: &str = "ASPIRE_SOLVER";

/// Executable looked up on `PATH` when nothing else is configured
pub const DEFAULT_SOLVER: &str = "clingo";

/// How the external solver is located and managed
#[derive(Debug, Clone)]
pub struct SolverConfig {
    /// Solver executable, a path or a name resolved through `PATH`
    pub executable: PathBuf,

    /// Time between the termination signal and the forced kill once a
    /// timeout has elapsed
    pub grace_period: Duration,

    /// Directory for the program and output files of each run
    pub temp_dir: PathBuf,
}

impl Default for SolverConfig {
    fn default() -> Self {
        let executable = std::env::var_os(SOLVER_ENV_VAR)
            .filter(|value| !value.is_empty())
            .map(PathBuf::from)
            .unwrap_or_else(|| PathBuf::from(DEFAULT_SOLVER));
        Self {
            executable,
            grace_period: Duration::from_secs(3),
            temp_dir: std::env::temp_dir(),
        }
    }
}

impl SolverConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_executable(mut self, executable: impl Into<PathBuf>) -> Self {
        self.executable = executable.into();
        self
    }

    pub fn with_grace_period(mut self, grace_period: Duration) -> Self {
        self.grace_period = grace_period;
        self
    }

    pub fn with_temp_dir(mut self, temp_dir: impl Into<PathBuf>) -> Self {
        self.temp_dir = temp_dir.into();
        self
    }
}
