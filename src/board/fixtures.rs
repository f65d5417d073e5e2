//! Seeded board contents used at startup.

use super::model::{Accent, Priority, Section, Task};

fn task(
    id: &str,
    title: &str,
    description: &str,
    priority: Priority,
    assignees: &[&str],
) -> Task {
    Task {
        id: id.to_owned(),
        title: title.to_owned(),
        description: description.to_owned(),
        priority,
        assignees: assignees.iter().map(|a| a.to_string()).collect(),
        status: String::new(),
        order: 0,
    }
}

/// Return the sections the board starts with.
///
pub fn initial_sections() -> Vec<Section> {
    let mut sections = vec![
        Section {
            id: "todo".to_owned(),
            title: "To Do Task".to_owned(),
            accent: Accent::Amber,
            tasks: vec![
                task(
                    "todo-redesign-homepage",
                    "Redesign Homepage Layout",
                    "Rework the homepage hero section and navigation flow.",
                    Priority::High,
                    &["AL", "MB", "+1"],
                ),
                task(
                    "todo-update-product-detail",
                    "Update Product Detail Page",
                    "Add detailed product imagery and improve specification tabs.",
                    Priority::High,
                    &["TS", "RM"],
                ),
                task(
                    "todo-optimize-checkout",
                    "Optimize Checkout Flow",
                    "Reduce steps and surface saved payment methods.",
                    Priority::Medium,
                    &["DL", "JP"],
                ),
                task(
                    "todo-add-wishlist",
                    "Add Wishlist Feature",
                    "Let customers save products for later comparisons.",
                    Priority::Medium,
                    &["AN", "KS"],
                ),
            ],
        },
        Section {
            id: "in-progress".to_owned(),
            title: "In Progress Task".to_owned(),
            accent: Accent::Sky,
            tasks: vec![
                task(
                    "in-progress-mobile-responsive",
                    "Improve Mobile Responsiveness",
                    "Tighten spacing across breakpoints and re-test layouts.",
                    Priority::Medium,
                    &["AL", "MB"],
                ),
                task(
                    "in-progress-stripe",
                    "Integrate Stripe Payment Gateway",
                    "Wire up Stripe API with seamless subscription billing.",
                    Priority::High,
                    &["TS", "RM", "DL"],
                ),
                task(
                    "in-progress-search-optimization",
                    "Product Search Optimization",
                    "Enhance query relevance and auto-complete suggestions.",
                    Priority::Medium,
                    &["JP", "KS"],
                ),
                task(
                    "in-progress-seo",
                    "Set Up SEO & Meta Tags",
                    "Implement essential tags for each product template.",
                    Priority::Normal,
                    &["AN", "DL"],
                ),
            ],
        },
    ];
    for section in sections.iter_mut() {
        section.renumber();
    }
    sections
}
