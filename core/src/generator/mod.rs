use crate::*;
pub use random::*;

mod random;

pub trait LayoutGenerator {
    fn generate(self, config: BoardConfig) -> Result<MineLayout>;
}
