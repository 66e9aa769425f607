//! The application route table: the study list and the student page.

use crate::{
    route::{RouteDescriptor, RouteTable},
    view::View,
};
use std::sync::Arc;

/// The study list page, served at `/`.
#[derive(Debug, Default, Clone, Copy)]
pub struct StudyListPage;

impl View for StudyListPage {
    fn render(&self) -> String {
        r#"<section class="study-list"><h1>Studies</h1><ul id="studies"></ul></section>"#
            .to_string()
    }
}

/// The student page, served at `/student`.
#[derive(Debug, Default, Clone, Copy)]
pub struct StudentPage;

impl View for StudentPage {
    fn render(&self) -> String {
        r#"<section class="student"><h1>Student</h1><div id="viewer"></div></section>"#.to_string()
    }
}

/// Builds the application's route table.
///
/// The table is fixed: `/` renders the study list and `/student` renders the student
/// page. There is deliberately no catch-all entry; unmatched locations surface
/// through the router's `on_not_found` callback.
pub fn routes() -> RouteTable {
    RouteTable::new(vec![
        RouteDescriptor::new("/", "StudyList", Arc::new(StudyListPage)),
        RouteDescriptor::new("/student", "Student", Arc::new(StudentPage)),
    ])
    .expect("static route table should be valid")
}
