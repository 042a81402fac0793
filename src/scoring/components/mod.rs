mod batting;
mod bowling;
mod fielding;

pub use batting::BattingComponent;
pub use bowling::BowlingComponent;
pub use fielding::FieldingComponent;
