use anyhow::Result;
use std::time::Instant;
use tracing::{info, warn};

use crate::ctx::Ctx;

pub mod stage0_scaffold;
pub mod stage1_load;
pub mod stage2_clean;
pub mod stage3_distribution;
pub mod stage4_reduce;
pub mod stage5_exocrine;
pub mod stage6_signature;
pub mod stage7_gsva;
pub mod stage8_output;

pub trait Stage {
    fn name(&self) -> &'static str;
    fn run(&self, ctx: &mut Ctx) -> Result<()>;
}

pub struct Pipeline {
    stages: Vec<Box<dyn Stage>>,
}

impl Pipeline {
    pub fn new(stages: Vec<Box<dyn Stage>>) -> Self {
        Self { stages }
    }

    /// Every stage of a full analysis run, in order.
    pub fn full() -> Self {
        Self::new(vec![
            Box::new(stage0_scaffold::Stage0Scaffold::new()),
            Box::new(stage1_load::Stage1Load::new()),
            Box::new(stage2_clean::Stage2Clean::new()),
            Box::new(stage3_distribution::Stage3Distribution::new()),
            Box::new(stage4_reduce::Stage4Reduce::new()),
            Box::new(stage5_exocrine::Stage5Exocrine::new()),
            Box::new(stage6_signature::Stage6Signature::new()),
            Box::new(stage7_gsva::Stage7Gsva::new()),
            Box::new(stage8_output::Stage8Output::new()),
        ])
    }

    pub fn stage_names(&self) -> Vec<&'static str> {
        self.stages.iter().map(|s| s.name()).collect()
    }

    pub fn run(&self, ctx: &mut Ctx) -> Result<()> {
        for stage in &self.stages {
            let start = Instant::now();
            info!(stage = stage.name(), "stage started");
            if let Err(err) = stage.run(ctx) {
                let elapsed_ms = start.elapsed().as_millis();
                warn!(
                    stage = stage.name(),
                    elapsed_ms = elapsed_ms as u64,
                    error = %err,
                    "stage failed"
                );
                return Err(err);
            }
            let elapsed_ms = start.elapsed().as_millis();
            info!(
                stage = stage.name(),
                elapsed_ms = elapsed_ms as u64,
                "stage finished"
            );
        }
        Ok(())
    }
}
