use pipesim_core::Simulator;
use pipesim_core::common::Width;
use pipesim_core::config::{CacheConfig, CacheHierarchyConfig};
use pipesim_core::core::Cpu;
use pipesim_core::core::pipeline::CycleReport;
use pipesim_core::core::pipeline::traits::FunctionalExecutor;
use pipesim_core::soc::MemoryStore;
use pipesim_core::stats::SimStats;

use crate::common::mocks::executor::{ScriptedExecutor, Step};

/// Memory window used by test programs.
pub const TEST_MEMORY_SIZE: usize = 0x1000;

/// Cache hierarchy where every access costs nothing extra, isolating hazard timing.
pub fn ideal_caches() -> CacheHierarchyConfig {
    caches_with_latency(0, 0)
}

/// 1 KiB, 16-byte block, 2-way caches with the given miss latencies.
pub fn caches_with_latency(icache: u32, dcache: u32) -> CacheHierarchyConfig {
    CacheHierarchyConfig {
        l1_i: CacheConfig::new(1024, 16, 2, icache),
        l1_d: CacheConfig::new(1024, 16, 2, dcache),
    }
}

/// Installs a `tracing` subscriber that writes through the test harness.
pub fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_test_writer()
        .with_env_filter("pipesim_core=debug")
        .try_init();
}

/// Simulator over a real `Cpu` with a small memory window and ideal caches.
pub struct TestContext<E = Cpu> {
    pub sim: Simulator<E>,
    pub reports: Vec<CycleReport>,
}

impl Default for TestContext {
    fn default() -> Self {
        Self::new()
    }
}

impl TestContext {
    pub fn new() -> Self {
        init_tracing();
        let cpu = Cpu::new(MemoryStore::new(TEST_MEMORY_SIZE));
        Self {
            sim: Simulator::new(cpu, &ideal_caches()).unwrap(),
            reports: Vec::new(),
        }
    }

    /// Rebuilds the timing side with different caches, keeping the CPU.
    pub fn with_caches(mut self, caches: &CacheHierarchyConfig) -> Self {
        let cpu = self.sim.cpu.clone();
        self.sim = Simulator::new(cpu, caches).unwrap();
        self
    }

    /// Writes the program at address 0 and resets the PC.
    pub fn load_program(mut self, instructions: &[u32]) -> Self {
        for (i, inst) in instructions.iter().enumerate() {
            self.sim
                .cpu
                .mem
                .set_value((i * 4) as u32, Width::Word, *inst)
                .unwrap();
        }
        self.sim.cpu.pc = 0;
        self
    }

    /// Convenience accessor for the CPU.
    pub fn cpu(&self) -> &Cpu {
        &self.sim.cpu
    }

    /// Mutable convenience accessor for the CPU.
    pub fn cpu_mut(&mut self) -> &mut Cpu {
        &mut self.sim.cpu
    }

    /// Set a general-purpose register value.
    pub fn set_reg(&mut self, reg: usize, val: u32) {
        self.sim.cpu.regs.write(reg, val);
    }

    /// Read a general-purpose register value.
    pub fn get_reg(&self, reg: usize) -> u32 {
        self.sim.cpu.regs.read(reg)
    }

    /// Read a memory word.
    pub fn read_word(&self, addr: u32) -> u32 {
        self.sim.cpu.mem.get_value(addr, Width::Word).unwrap()
    }

    /// Write a memory word.
    pub fn write_word(&mut self, addr: u32, value: u32) {
        self.sim.cpu.mem.set_value(addr, Width::Word, value).unwrap();
    }
}

impl TestContext<ScriptedExecutor> {
    /// Timing-only context driven by a scripted instruction stream.
    pub fn scripted<S: Into<Step>>(steps: impl IntoIterator<Item = S>) -> Self {
        Self::scripted_with(steps, &ideal_caches())
    }

    pub fn scripted_with<S: Into<Step>>(
        steps: impl IntoIterator<Item = S>,
        caches: &CacheHierarchyConfig,
    ) -> Self {
        init_tracing();
        Self {
            sim: Simulator::new(ScriptedExecutor::new(steps), caches).unwrap(),
            reports: Vec::new(),
        }
    }
}

impl<E: FunctionalExecutor> TestContext<E> {
    /// Runs `n` cycles, recording every snapshot.
    pub fn run(&mut self, n: usize) -> &mut Self {
        for _ in 0..n {
            let report = self.sim.tick().unwrap();
            self.reports.push(report);
        }
        self
    }

    /// Ticks until the pipeline drains after halt, recording every snapshot.
    ///
    /// Panics after `limit` cycles so a broken drain fails instead of hanging.
    pub fn run_to_halt(&mut self, limit: usize) -> &SimStats {
        for _ in 0..limit {
            let report = self.sim.tick().unwrap();
            self.reports.push(report);
            if report.halted {
                return &self.sim.stats;
            }
        }
        panic!("no halt within {limit} cycles");
    }

    pub fn stats(&self) -> &SimStats {
        &self.sim.stats
    }

    /// Last recorded snapshot.
    pub fn last(&self) -> &CycleReport {
        self.reports.last().expect("no cycles recorded")
    }
}
