//! gradeforge-report — HTML report generation.

pub mod html;
