/// UI layer: filter panel widgets and the two chart panels.

pub mod charts;
pub mod panels;
