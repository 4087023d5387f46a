//! 查重结果的展示与后续操作

mod cycle;
mod html;
mod view;

pub use cycle::{CheckCycle, CyclePhase};
pub use html::{escape, render_html};
pub use view::{CardKind, NextAction, ReconciliationView, ResultCard, Routes};
