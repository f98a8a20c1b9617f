//! Simulator: owns the functional executor and the timing engine side-by-side.
//!
//! The executor runs ahead of the pipeline, one instruction per normal cycle,
//! and the engine only tracks timing. Both are driven through one shared
//! [`Simulator::tick`], which [`Simulator::run_cycles`] and
//! [`Simulator::run_till_halt`] wrap.

use std::path::{Path, PathBuf};

use crate::common::error::SimError;
use crate::config::{CacheHierarchyConfig, Config};
use crate::core::Cpu;
use crate::core::pipeline::engine::{CycleReport, TimingEngine};
use crate::core::pipeline::traits::FunctionalExecutor;
use crate::sim::output::{self, PipeTrace};
use crate::stats::SimStats;

/// Outcome of a bounded or unbounded run.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum RunStatus {
    /// The requested number of cycles ran without reaching halt.
    Success,
    /// The halt word has drained out of the pipeline.
    Halt,
}

/// Top-level simulator: functional executor + pipeline timing + trace sink.
#[derive(Debug)]
pub struct Simulator<E = Cpu> {
    /// Functional executor supplying instructions.
    pub cpu: E,
    /// Pipeline timing state and caches.
    pub pipeline: TimingEngine,
    /// Counters for the run.
    pub stats: SimStats,
    trace: Option<PipeTrace>,
    base: Option<PathBuf>,
}

impl<E: FunctionalExecutor> Simulator<E> {
    /// Creates a simulator with no artifacts.
    ///
    /// # Errors
    ///
    /// Returns `SimError::Configuration` if either cache geometry is invalid.
    pub fn new(cpu: E, caches: &CacheHierarchyConfig) -> Result<Self, SimError> {
        Ok(Self {
            cpu,
            pipeline: TimingEngine::new(caches)?,
            stats: SimStats::default(),
            trace: None,
            base: None,
        })
    }

    /// Sets the artifact prefix and, if `trace` is set, starts the
    /// per-cycle pipeline trace.
    ///
    /// A trace file that cannot be created is logged and skipped.
    #[must_use]
    pub fn with_output(mut self, base: impl Into<PathBuf>, trace: bool) -> Self {
        let base = base.into();
        if trace {
            self.trace = match PipeTrace::create(&base) {
                Ok(t) => Some(t),
                Err(e) => {
                    tracing::warn!(base = %base.display(), error = %e, "pipeline trace disabled");
                    None
                }
            };
        }
        self.base = Some(base);
        self
    }

    /// Artifact prefix, if outputs were requested.
    pub fn base(&self) -> Option<&Path> {
        self.base.as_deref()
    }

    /// Advances the simulator by one clock cycle.
    ///
    /// # Returns
    ///
    /// The cycle's snapshot.
    ///
    /// # Errors
    ///
    /// Propagates a fatal executor error (an out-of-range access).
    pub fn tick(&mut self) -> Result<CycleReport, SimError> {
        let report = self.pipeline.tick(&mut self.cpu, &mut self.stats)?;
        let failed = match &mut self.trace {
            Some(trace) => trace
                .record(&report)
                .map_err(|e| {
                    tracing::warn!(path = %trace.path().display(), error = %e, "pipeline trace write failed");
                })
                .is_err(),
            None => false,
        };
        if failed {
            self.trace = None;
        }
        Ok(report)
    }

    /// Runs at most `cycles` cycles.
    ///
    /// # Returns
    ///
    /// `RunStatus::Halt` as soon as the pipeline has drained, otherwise
    /// `RunStatus::Success` after exactly `cycles` cycles.
    ///
    /// # Errors
    ///
    /// Propagates a fatal error from [`Self::tick`].
    pub fn run_cycles(&mut self, cycles: u64) -> Result<RunStatus, SimError> {
        if self.pipeline.is_done() {
            return Ok(RunStatus::Halt);
        }
        for _ in 0..cycles {
            if self.tick()?.halted {
                return Ok(RunStatus::Halt);
            }
        }
        Ok(RunStatus::Success)
    }

    /// Runs until the halt word has drained out of the pipeline.
    ///
    /// # Errors
    ///
    /// Propagates a fatal error from [`Self::tick`].
    pub fn run_till_halt(&mut self) -> Result<RunStatus, SimError> {
        while !self.pipeline.is_done() {
            let _ = self.tick()?;
        }
        tracing::info!(
            cycles = self.stats.cycles,
            instructions = self.stats.dynamic_instructions,
            "halted"
        );
        Ok(RunStatus::Halt)
    }

    /// Runs to halt, or for `max_cycles` cycles when non-zero.
    ///
    /// # Errors
    ///
    /// Propagates a fatal error from [`Self::tick`].
    pub fn run(&mut self, max_cycles: u64) -> Result<RunStatus, SimError> {
        if max_cycles == 0 {
            self.run_till_halt()
        } else {
            self.run_cycles(max_cycles)
        }
    }

    fn flush_trace(&mut self) {
        if let Some(trace) = &mut self.trace {
            if let Err(e) = trace.flush() {
                tracing::warn!(path = %trace.path().display(), error = %e, "pipeline trace flush failed");
            }
        }
    }
}

impl Simulator<Cpu> {
    /// Loads `program` and builds a simulator over it with artifacts named
    /// after the program.
    ///
    /// # Errors
    ///
    /// Returns `SimError::Io` or `SimError::OutOfRange` from loading, or
    /// `SimError::Configuration` for an invalid cache geometry.
    pub fn from_program(
        program: &Path,
        caches: &CacheHierarchyConfig,
        config: &Config,
    ) -> Result<Self, SimError> {
        let mem = crate::sim::loader::load_program(program, config)?;
        let base = crate::sim::loader::base_name(program, "cycle");
        tracing::info!(program = %program.display(), "cycle-accurate run");
        Ok(Self::new(Cpu::new(mem), caches)?.with_output(base, config.general.trace_pipeline))
    }

    /// Writes the end-of-run artifacts: registers, memory, cache state and
    /// statistics. Does nothing if no output prefix was set.
    pub fn finalize(&mut self, dump_start: u32, dump_end: u32) {
        self.flush_trace();
        let Some(base) = self.base.clone() else {
            return;
        };
        let _ = output::write_artifact(&base, "reg_state", |out| {
            output::write_registers(&self.cpu.regs, out)
        });
        let _ = output::write_artifact(&base, "mem_state", |out| {
            self.cpu.mem.dump(dump_start, dump_end, out)
        });
        let _ = output::write_artifact(&base, "cache_state", |out| {
            self.pipeline.icache().dump("I-Cache", out)?;
            self.pipeline.dcache().dump("D-Cache", out)
        });
        let _ = output::write_artifact(&base, "sim_stats", |out| self.stats.write_report(out));
    }
}

/// Runs `program` functionally to the halt word, without timing, and writes
/// the register and memory artifacts under the `_funct` prefix.
///
/// # Returns
///
/// The executor in its final state.
///
/// # Errors
///
/// Returns `SimError::Io` or `SimError::OutOfRange` from loading or from an
/// access outside memory, or `SimError::Configuration` if `max_instructions`
/// is reached first.
pub fn run_functional(
    program: &Path,
    config: &Config,
    max_instructions: u64,
) -> Result<Cpu, SimError> {
    let mem = crate::sim::loader::load_program(program, config)?;
    let mut cpu = Cpu::new(mem);
    while !cpu.is_halted() {
        if max_instructions != 0 && cpu.instructions() >= max_instructions {
            return Err(SimError::Configuration(format!(
                "no halt within {max_instructions} instructions"
            )));
        }
        let _ = cpu.step()?;
    }
    tracing::info!(instructions = cpu.instructions(), "functional run halted");

    let base = crate::sim::loader::base_name(program, "funct");
    let _ = output::write_artifact(&base, "reg_state", |out| {
        output::write_registers(&cpu.regs, out)
    });
    let _ = output::write_artifact(&base, "mem_state", |out| {
        cpu.mem
            .dump(config.memory.dump_start, config.memory.dump_end, out)
    });
    Ok(cpu)
}
