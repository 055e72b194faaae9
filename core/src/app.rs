//! Application related stuff

use crate::error::*;
use crate::raytrace::*;
use clap::{Parser, ValueEnum};

lazy_static! {
    /// The global application options.
    pub static ref OPTIONS: Options = Options::parse();
}

/// Demonstration scenes the command line driver can trace.
#[derive(ValueEnum, Copy, Clone, Debug, PartialEq, Eq)]
pub enum Scene {
    /// Plano-convex lens with a confocal source.
    Lens,

    /// Rhomboid prism and beam stop with a parallel source.
    Rhomboid,

    /// Two facing mirrors that trap the rays.
    Mirrors,
}

/// System wide options.
#[derive(Parser, Clone, Debug)]
#[command(author, version, about, long_about = None)]
pub struct Options {
    /// Number of threads to use for tracing.
    #[arg(
        long = "nthreads",
        short = 't',
        value_name = "NUM",
        default_value_t = 1,
        help = "Use specified number of threads for tracing."
    )]
    n_threads: usize,

    /// Maximum number of generations per ray source.
    #[arg(
        long = "recursion-limit",
        value_name = "NUM",
        default_value_t = DEFAULT_RECURSION_LIMIT,
        help = "Maximum number of ray generations traced per source."
    )]
    pub recursion_limit: usize,

    /// Minimum distance for a valid intersection.
    #[arg(
        long,
        value_name = "FLOAT",
        default_value_t = INTERSECTION_EPSILON,
        help = "Ignore intersections closer than this distance."
    )]
    pub epsilon: Float,

    /// Scene to trace.
    #[arg(long, value_enum, default_value_t = Scene::Lens, help = "Demonstration scene to trace.")]
    pub scene: Scene,

    /// Rays per side of the source grid.
    #[arg(
        long,
        value_name = "NUM",
        default_value_t = 10,
        help = "Number of rays along each side of the source grid."
    )]
    pub rays: usize,

    /// Suppress all text output other than error messages.
    #[arg(long, help = "Suppress all text output other than error messages.")]
    pub quiet: bool,

    /// Path to the JSON trace dump.
    #[arg(
        long = "outfile",
        short = 'o',
        value_name = "FILE",
        help = "Write the traced rays as JSON to the given filename."
    )]
    pub out_file: Option<String>,
}

impl Options {
    /// Returns the number of threads to use.
    pub fn threads(&self) -> usize {
        let max_threads = num_cpus::get();
        match self.n_threads {
            0 => {
                warn!("Invalid nthreads");
                1
            }
            n if n > max_threads => {
                warn!("Num threads > max logical CPUs {}", max_threads);
                max_threads
            }
            n => n,
        }
    }
}

/// Parameters of a trace run.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct TraceConfig {
    /// Maximum number of generations per ray source.
    pub recursion_limit: usize,

    /// Intersections at or below this distance are ignored.
    pub epsilon: Float,

    /// Number of worker threads used within a generation.
    pub n_threads: usize,

    /// Number of rays in a parallel work item.
    pub chunk_size: usize,
}

impl Default for TraceConfig {
    fn default() -> Self {
        Self {
            recursion_limit: DEFAULT_RECURSION_LIMIT,
            epsilon: INTERSECTION_EPSILON,
            n_threads: 1,
            chunk_size: 1024,
        }
    }
}

impl TraceConfig {
    /// Returns an error if the parameters cannot drive a trace.
    pub fn validate(&self) -> TraceResult<()> {
        if self.recursion_limit == 0 {
            return Err(TraceError::InvalidConfig(
                "recursion limit must be at least 1".to_string(),
            ));
        }
        if !(self.epsilon.is_finite() && self.epsilon > 0.0) {
            return Err(TraceError::InvalidConfig(format!(
                "epsilon must be positive, got {}",
                self.epsilon
            )));
        }
        if self.n_threads == 0 || self.chunk_size == 0 {
            return Err(TraceError::InvalidConfig(
                "thread count and chunk size must be at least 1".to_string(),
            ));
        }
        Ok(())
    }
}

impl From<&Options> for TraceConfig {
    /// Build the trace parameters from the command line.
    ///
    /// * `options` - Command line options.
    fn from(options: &Options) -> Self {
        Self {
            recursion_limit: options.recursion_limit,
            epsilon: options.epsilon,
            n_threads: options.threads(),
            ..Self::default()
        }
    }
}

// ----------------------------------------------------------------------------
// Tests
// ----------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_is_valid() {
        assert!(TraceConfig::default().validate().is_ok());
    }

    #[test]
    fn reject_bad_config() {
        let bad = [
            TraceConfig {
                recursion_limit: 0,
                ..TraceConfig::default()
            },
            TraceConfig {
                epsilon: 0.0,
                ..TraceConfig::default()
            },
            TraceConfig {
                epsilon: Float::NAN,
                ..TraceConfig::default()
            },
            TraceConfig {
                chunk_size: 0,
                ..TraceConfig::default()
            },
        ];
        for config in bad {
            assert!(matches!(config.validate(), Err(TraceError::InvalidConfig(_))));
        }
    }

    #[test]
    fn options_from_args() {
        let options = Options::parse_from([
            "raytrace",
            "--recursion-limit",
            "12",
            "--scene",
            "mirrors",
            "-t",
            "1",
        ]);
        assert_eq!(options.scene, Scene::Mirrors);
        let config = TraceConfig::from(&options);
        assert_eq!(config.recursion_limit, 12);
        assert_eq!(config.n_threads, 1);
        assert_eq!(config.epsilon, INTERSECTION_EPSILON);
    }
}
