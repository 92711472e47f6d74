//! Link-list checker shared by ingredients documented as a `<dl>` of links
//!
//! A link-list section is an `h2` whose section holds a single `dl`; each
//! term names the linked item and is immediately described by a `dd`.

use crate::application::Reporter;
use crate::domain::select::{descendants, select_first};
use crate::domain::{slice_section, Selector, TreeNode};

/// Check the generic link-list shape of the `h2#<label>` section.
///
/// Returns `false` without reporting when the heading is missing; the
/// ingredient handler owns that finding.
pub fn check_link_list(label: &str, tree: &TreeNode, reporter: &mut Reporter) -> bool {
    let selector = Selector::tag("h2").with_id(label);
    let Some(heading) = select_first(tree, |n| selector.matches(n)) else {
        return false;
    };
    let section = slice_section(heading, tree);

    let mut ok = true;
    let lists = section.select_all(|n| n.is_tag("dl"));
    if lists.len() != 1 {
        reporter.fail(
            &section,
            format!("{} section must contain exactly one DL", label),
            "link-list-single-dl",
        );
        ok = false;
    }

    for list in lists {
        let items: Vec<&TreeNode> = list
            .children()
            .iter()
            .filter(|n| !n.is_whitespace_text())
            .collect();

        for (i, item) in items.iter().enumerate() {
            if !item.is_tag("dt") {
                continue;
            }
            let has_link = descendants(item)
                .skip(1)
                .any(|n| n.is_tag("a") || n.is_tag("code"));
            if !has_link {
                reporter.fail(
                    *item,
                    format!("{} DT items must link to or name the documented item", label),
                    "link-list-dt-has-link",
                );
                ok = false;
            }
            let described = items.get(i + 1).map(|next| next.is_tag("dd")).unwrap_or(false);
            if !described {
                reporter.fail(
                    *item,
                    format!("{} DT items must be followed by a DD", label),
                    "link-list-dt-followed-by-dd",
                );
                ok = false;
            }
        }
    }
    ok
}
