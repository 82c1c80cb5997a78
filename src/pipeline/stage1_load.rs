use anyhow::Result;

use crate::ctx::Ctx;
use crate::io::gct::read_gct;
use crate::pipeline::Stage;

pub struct Stage1Load;

impl Stage1Load {
    pub fn new() -> Self {
        Self
    }
}

impl Stage for Stage1Load {
    fn name(&self) -> &'static str {
        "stage1_load"
    }

    fn run(&self, ctx: &mut Ctx) -> Result<()> {
        let dataset = read_gct(&ctx.input)?;
        ctx.dataset = Some(dataset);
        Ok(())
    }
}
