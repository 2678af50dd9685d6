use serde::{Deserialize, Serialize};
use strum::{Display, EnumIter};


// Colors of the pieces. A diagonal-grid board seats up to six players, one color each.
#[derive(
    Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Debug, Display, EnumIter, Serialize,
    Deserialize,
)]
pub enum PieceColor {
    Red,
    Green,
    Blue,
    Yellow,
    Black,
    White,
}
