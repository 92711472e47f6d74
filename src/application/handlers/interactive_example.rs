//! `interactive_example` ingredient: placement of the embedded interactive example
//!
//! At most one example, in the lead section before the first `h2`, alone in
//! a `div` that directly follows a plain (non-admonition) paragraph.

use crate::application::handlers::{HandlerContext, HandlerOutcome};
use crate::application::Reporter;
use crate::domain::select::select_first;
use crate::domain::{slice_between, slice_section, Slice, TreeNode};

/// A macro invocation together with the node that holds it.
struct ExampleSite<'a> {
    /// `None` when the invocation sits at the top level of the slice
    container: Option<&'a TreeNode>,
    invocation: &'a TreeNode,
}

fn collect_sites<'a>(node: &'a TreeNode, ctx: &HandlerContext<'_>, sites: &mut Vec<ExampleSite<'a>>) {
    for child in node.children() {
        if ctx.classifier.is_macro(child, ctx.interactive_example_macro) {
            sites.push(ExampleSite {
                container: Some(node),
                invocation: child,
            });
        }
        collect_sites(child, ctx, sites);
    }
}

/// Every interactive example invoked anywhere in `slice`.
fn interactive_examples<'a>(slice: &Slice<'a>, ctx: &HandlerContext<'_>) -> Vec<ExampleSite<'a>> {
    let mut sites = Vec::new();
    for &top in slice.children() {
        if ctx.classifier.is_macro(top, ctx.interactive_example_macro) {
            sites.push(ExampleSite {
                container: None,
                invocation: top,
            });
        }
        collect_sites(top, ctx, &mut sites);
    }
    sites
}

/// A `div` whose only child is the interactive example macro.
fn is_interactive_example_node(node: &TreeNode, ctx: &HandlerContext<'_>) -> bool {
    node.is_tag("div")
        && node.children().len() == 1
        && ctx
            .classifier
            .is_macro(&node.children()[0], ctx.interactive_example_macro)
}

fn is_paragraph(node: Option<&TreeNode>, ctx: &HandlerContext<'_>) -> bool {
    node.map(|n| n.is_tag("p") && !ctx.classifier.is_admonition(n))
        .unwrap_or(false)
}

pub fn handle<'a>(tree: &'a TreeNode, reporter: &mut Reporter, ctx: &HandlerContext<'_>) -> HandlerOutcome<'a> {
    let body = select_first(tree, |n| n.is_tag("body")).unwrap_or(tree);

    // From the first H2 onwards there must be no interactive example
    if let Some(first_h2) = select_first(body, |n| n.is_tag("h2")) {
        let after_first_h2 = slice_between(first_h2, |_| false, body);
        if !interactive_examples(&after_first_h2, ctx).is_empty() {
            reporter.fail(
                &after_first_h2,
                "Interactive examples must be before first H2",
                "interactive-example-before-first-h2",
            );
        }
    }

    let Some(first) = body.children().first() else {
        return HandlerOutcome::Checked;
    };
    let before_first_h2 = slice_section(first, body).take_while(|n| !n.is_tag("h2"));

    // The lead section holds zero or one interactive examples
    let examples = interactive_examples(&before_first_h2, ctx);
    if examples.len() > 1 {
        reporter.fail(
            &before_first_h2,
            "Only one interactive example may be included",
            "at-most-one-interactive-example",
        );
    }
    let Some(example) = examples.first() else {
        return HandlerOutcome::Checked;
    };

    match example.container {
        Some(container) if container.is_tag("div") => {}
        container => reporter.fail(
            container.unwrap_or(example.invocation),
            "Interactive example must be in a DIV",
            "interactive-example-inside-div",
        ),
    }

    // It must sit at the top level, right after a P that is not an admonition
    let mut previous: Option<&TreeNode> = None;
    for node in before_first_h2.significant_children() {
        if is_interactive_example_node(node, ctx) && !is_paragraph(previous, ctx) {
            reporter.fail(
                node,
                "Interactive example must be preceded by a P node",
                "interactive-example-preceded-by-p",
            );
        }
        previous = Some(node);
    }

    HandlerOutcome::Checked
}
