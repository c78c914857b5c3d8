pub mod chart;
pub mod sliders;
pub mod report;
pub mod plot2d;
pub mod animate2d;
