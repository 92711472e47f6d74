//! `constructor` ingredient: the Constructor section of a class page
//!
//! The section is either an explicit statement that the object cannot be
//! constructed, or a one-entry link list whose description reads
//! "Creates a new <code>Name</code> object."

use crate::application::handlers::{HandlerContext, HandlerOutcome};
use crate::application::link_list::check_link_list;
use crate::application::Reporter;
use crate::domain::select::select_first;
use crate::domain::{slice_section, Selector, Slice, TreeNode};

const SECTION_ID: &str = "Constructor";
const NO_CONSTRUCTOR: &str = "This object cannot be instantiated directly.";
const DESCRIPTION_START: &str = "Creates a new ";
const DESCRIPTION_END: &str = " object.";

fn check_text(node: &TreeNode, text: &str) -> bool {
    node.as_text() == Some(text)
}

/// Second top-level element is a paragraph opening with [`NO_CONSTRUCTOR`].
fn declares_no_constructor(section: &Slice<'_>) -> bool {
    let elements: Vec<&TreeNode> = section
        .children()
        .iter()
        .copied()
        .filter(|n| n.is_element())
        .collect();

    elements
        .get(1)
        .filter(|p| p.is_tag("p"))
        .and_then(|p| p.children().first())
        .map(|first| first.starts_with_text(NO_CONSTRUCTOR))
        .unwrap_or(false)
}

pub fn handle<'a>(tree: &'a TreeNode, reporter: &mut Reporter, _ctx: &HandlerContext<'_>) -> HandlerOutcome<'a> {
    let selector = Selector::tag("h2").with_id(SECTION_ID);
    let Some(heading) = select_first(tree, |n| selector.matches(n)) else {
        reporter.expected(tree, &selector, "expected-heading");
        return HandlerOutcome::Invalid;
    };

    let section = slice_section(heading, tree);

    // An explicit "cannot be instantiated" statement replaces the link list
    if declares_no_constructor(&section) {
        return HandlerOutcome::Valid(heading);
    }

    let mut ok = check_link_list(SECTION_ID, tree, reporter);

    let terms = section.select_all(|n| n.is_tag("dt"));
    if terms.len() != 1 {
        reporter.fail(
            &section,
            "Constructor section may only contain one DT item",
            "only-single-constructor-dt",
        );
        ok = false;
    }

    let descriptions = section.select_all(|n| n.is_tag("dd"));
    let [dd] = descriptions.as_slice() else {
        reporter.fail(
            &section,
            "Constructor section may only contain one DD item",
            "only-single-constructor-dd",
        );
        return HandlerOutcome::Invalid;
    };

    let parts = dd.children();
    if parts.len() < 3 {
        reporter.fail(
            *dd,
            "Constructor description must be in the form `Creates a new <code>...</code> object.`",
            "constructor-description-at-least-three-nodes",
        );
        return HandlerOutcome::Invalid;
    }

    if !check_text(&parts[0], DESCRIPTION_START) {
        reporter.fail(
            &section,
            "Constructor description must be in the form 'Creates a new <code>...</code> object.'",
            "constructor-description-first-node",
        );
        ok = false;
    }

    if !parts[1].is_tag("code") {
        reporter.fail(
            &section,
            "Constructor description must contain <code>Object</code> after 'Creates a new'",
            "constructor-description-second-node",
        );
        ok = false;
    }

    if !parts[2].starts_with_text(DESCRIPTION_END) {
        reporter.fail(
            &section,
            "Constructor description must end first sentence with ' object.'",
            "constructor-description-third-node",
        );
        ok = false;
    }

    if ok {
        HandlerOutcome::Valid(heading)
    } else {
        HandlerOutcome::Invalid
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::MacroClassifier;
    use crate::domain::Severity;
    use crate::util::testing::{el, h, text};

    fn run(tree: &TreeNode) -> (HandlerOutcome<'_>, Reporter) {
        let classifier = MacroClassifier::default();
        let ctx = HandlerContext {
            classifier: &classifier,
            interactive_example_macro: "EmbedInteractiveExample",
        };
        let mut reporter = Reporter::new();
        let outcome = handle(tree, &mut reporter, &ctx);
        (outcome, reporter)
    }

    fn codes(reporter: &Reporter) -> Vec<&str> {
        reporter.findings().iter().map(|f| f.code.as_str()).collect()
    }

    fn term() -> TreeNode {
        el("dt", [el("a", [el("code", [text("Foo()")])])])
    }

    fn description(children: Vec<TreeNode>) -> TreeNode {
        el("dd", children)
    }

    fn well_formed_description() -> TreeNode {
        description(vec![
            text("Creates a new "),
            el("code", [text("Foo")]),
            text(" object. It does X."),
        ])
    }

    fn page(list: TreeNode) -> TreeNode {
        el(
            "body",
            [
                el("p", [text("The Foo object.")]),
                h(2, "Constructor"),
                list,
                h(2, "Methods"),
                el("dl", [term(), well_formed_description()]),
            ],
        )
    }

    #[test]
    fn given_well_formed_constructor_when_handling_then_returns_heading() {
        let tree = page(el("dl", [term(), well_formed_description()]));
        let (outcome, reporter) = run(&tree);

        match outcome {
            HandlerOutcome::Valid(node) => assert_eq!(node.id(), Some("Constructor")),
            other => panic!("expected valid outcome, got {:?}", other),
        }
        assert!(reporter.is_empty(), "{:?}", reporter.findings());
    }

    #[test]
    fn given_no_heading_when_handling_then_expected_heading() {
        let tree = el("body", [el("p", [text("x")])]);
        let (outcome, reporter) = run(&tree);

        assert_eq!(outcome, HandlerOutcome::Invalid);
        assert_eq!(codes(&reporter), vec!["expected-heading"]);
        assert_eq!(reporter.findings()[0].severity, Severity::Expected);
    }

    #[test]
    fn given_two_descriptions_when_handling_then_single_dd_finding_only() {
        let tree = page(el(
            "dl",
            [term(), well_formed_description(), well_formed_description()],
        ));
        let (outcome, reporter) = run(&tree);

        assert_eq!(outcome, HandlerOutcome::Invalid);
        assert_eq!(codes(&reporter), vec!["only-single-constructor-dd"]);
    }

    #[test]
    fn given_cannot_be_instantiated_statement_when_handling_then_valid_regardless_of_list() {
        let tree = el(
            "body",
            [
                h(2, "Constructor"),
                el(
                    "p",
                    [text("This object cannot be instantiated directly. Use Bar instead.")],
                ),
                el("dl", [el("dt", [text("x")]), el("dt", [text("y")])]),
            ],
        );
        let (outcome, reporter) = run(&tree);

        assert!(matches!(outcome, HandlerOutcome::Valid(_)));
        assert!(reporter.is_empty());
    }

    #[test]
    fn given_two_terms_when_handling_then_dt_finding_and_continues() {
        let second_term = el("dt", [el("code", [text("Foo(bar)")])]);
        let tree = page(el(
            "dl",
            [term(), second_term, well_formed_description()],
        ));
        let (outcome, reporter) = run(&tree);

        assert_eq!(outcome, HandlerOutcome::Invalid);
        // the first term is not directly described, the link list reports it
        assert_eq!(
            codes(&reporter),
            vec!["link-list-dt-followed-by-dd", "only-single-constructor-dt"]
        );
    }

    #[test]
    fn given_short_description_when_handling_then_fatal_three_nodes_finding() {
        let tree = page(el(
            "dl",
            [term(), description(vec![text("Creates a Foo.")])],
        ));
        let (outcome, reporter) = run(&tree);

        assert_eq!(outcome, HandlerOutcome::Invalid);
        assert_eq!(
            codes(&reporter),
            vec!["constructor-description-at-least-three-nodes"]
        );
        assert_eq!(reporter.findings()[0].node, "dd");
    }

    #[test]
    fn given_every_part_wrong_when_handling_then_each_reported() {
        let tree = page(el(
            "dl",
            [
                term(),
                description(vec![
                    text("Makes a "),
                    el("em", [text("Foo")]),
                    text(" thing."),
                ]),
            ],
        ));
        let (outcome, reporter) = run(&tree);

        assert_eq!(outcome, HandlerOutcome::Invalid);
        assert_eq!(
            codes(&reporter),
            vec![
                "constructor-description-first-node",
                "constructor-description-second-node",
                "constructor-description-third-node",
            ]
        );
        assert!(reporter.findings().iter().all(|f| f.node == "section(h2#Constructor)"));
    }
}
