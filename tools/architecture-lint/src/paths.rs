//! Path extraction from parsed Rust files.

use std::collections::BTreeSet;

use syn::visit::Visit;

/// Every path a file names, as identifier segments. `use` trees are
/// flattened so `use a::{b, c::d}` yields `a::b` and `a::c::d`; globs end in
/// `*`.
pub(crate) fn collect(file: &syn::File) -> BTreeSet<Vec<String>> {
    let mut collector = Collector::default();
    collector.visit_file(file);
    collector.paths
}

#[derive(Default)]
struct Collector {
    paths: BTreeSet<Vec<String>>,
}

impl Collector {
    fn flatten(&mut self, tree: &syn::UseTree, prefix: &mut Vec<String>) {
        match tree {
            syn::UseTree::Path(path) => {
                prefix.push(path.ident.to_string());
                self.flatten(&path.tree, prefix);
                prefix.pop();
            }
            syn::UseTree::Name(syn::UseName { ident })
            | syn::UseTree::Rename(syn::UseRename { ident, .. }) => {
                self.push_with(prefix, ident.to_string());
            }
            syn::UseTree::Glob(_) => self.push_with(prefix, "*".to_owned()),
            syn::UseTree::Group(group) => {
                for item in &group.items {
                    self.flatten(item, prefix);
                }
            }
        }
    }

    fn push_with(&mut self, prefix: &[String], last: String) {
        let mut segments = prefix.to_vec();
        segments.push(last);
        self.paths.insert(segments);
    }
}

impl<'ast> Visit<'ast> for Collector {
    fn visit_path(&mut self, node: &'ast syn::Path) {
        let segments: Vec<String> = node.segments.iter().map(|s| s.ident.to_string()).collect();
        if !segments.is_empty() {
            self.paths.insert(segments);
        }
        syn::visit::visit_path(self, node);
    }

    fn visit_item_use(&mut self, node: &'ast syn::ItemUse) {
        self.flatten(&node.tree, &mut Vec::new());
    }
}

#[cfg(test)]
mod tests {
    use rstest::rstest;

    use super::collect;

    fn joined(source: &str) -> Vec<String> {
        let file = syn::parse_file(source).expect("valid Rust");
        collect(&file).into_iter().map(|p| p.join("::")).collect()
    }

    #[rstest]
    fn use_groups_are_flattened() {
        let paths = joined("use chrono::{NaiveDate, offset::{Local as L, Utc}}; use diesel::prelude::*;");
        assert_eq!(
            paths,
            [
                "chrono::NaiveDate",
                "chrono::offset::Local",
                "chrono::offset::Utc",
                "diesel::prelude::*",
            ]
        );
    }

    #[rstest]
    fn expression_and_type_paths_are_seen() {
        let paths = joined("fn f() -> actix_web::HttpResponse { let _t = std::time::SystemTime::now(); todo!() }");
        assert!(paths.contains(&"actix_web::HttpResponse".to_owned()));
        assert!(paths.contains(&"std::time::SystemTime::now".to_owned()));
    }
}
