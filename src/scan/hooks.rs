use tree_sitter::Node;

use super::{Collector, ScanContext, Shape};
use crate::dedup::FirstSeen;
use crate::model::HookCallMatch;
use crate::util::txt;

/// Returns `true` for names following the hook convention: `use` followed by
/// an ASCII uppercase letter, digit, or underscore.
///
/// `useState`, `useX`, `use2D` and `use_thing` match; `user`, `userProfile`
/// and a bare `use` do not.
pub fn is_hook_name(name: &str) -> bool {
    let Some(rest) = name.strip_prefix("use") else {
        return false;
    };
    rest.bytes()
        .next()
        .is_some_and(|b| b.is_ascii_uppercase() || b.is_ascii_digit() || b == b'_')
}

/// Collects every call whose callee name is a hook, at the callee's line.
///
/// Matches `useEffect(...)`, `React.useState(...)`, `store?.useSelector(...)`
/// anywhere in the tree, including inside nested callbacks.
#[derive(Default)]
pub(super) struct HookCollector {
    found: FirstSeen<(String, usize), HookCallMatch>,
}

impl Collector for HookCollector {
    type Output = Vec<HookCallMatch>;

    fn visit(&mut self, _node: Node, shape: Shape, cx: &ScanContext) {
        let Shape::Call { callee } = shape else {
            return;
        };
        let name = txt(callee, cx.src);
        if !is_hook_name(name) {
            return;
        }
        let line = cx.lines.start_line(callee);
        tracing::trace!(name, line, "hook call");
        self.found.push(
            (name.to_string(), line),
            HookCallMatch {
                name: name.to_string(),
                line,
            },
        );
    }

    fn finish(self) -> Self::Output {
        self.found.into_vec()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scan::extract_hook_calls;

    fn hooks(src: &str) -> Vec<(String, usize)> {
        extract_hook_calls(src)
            .into_iter()
            .map(|h| (h.name, h.line))
            .collect()
    }

    #[test]
    fn hook_name_boundary() {
        assert!(is_hook_name("useState"));
        assert!(is_hook_name("useX"));
        assert!(is_hook_name("use2D"));
        assert!(is_hook_name("use_legacy"));
        assert!(!is_hook_name("use"));
        assert!(!is_hook_name("user"));
        assert!(!is_hook_name("userProfile"));
        assert!(!is_hook_name("Usestate"));
        assert!(!is_hook_name("useÉtat"));
    }

    #[test]
    fn bare_and_member_calls_match() {
        let src = "useEffect(() => {}, [])\nobj.useCustomThing()\n";
        assert_eq!(
            hooks(src),
            vec![("useEffect".to_string(), 1), ("useCustomThing".to_string(), 2)]
        );
    }

    #[test]
    fn lowercase_after_use_is_not_a_hook() {
        assert!(hooks("userProfile()\nuser.useless()\n").is_empty());
    }

    #[test]
    fn member_hook_is_recorded_at_property_line() {
        let src = "api\n  .useQuery(key)\n";
        assert_eq!(hooks(src), vec![("useQuery".to_string(), 2)]);
    }

    #[test]
    fn optional_chain_member_matches() {
        assert_eq!(hooks("store?.useSelector(pick)"), vec![("useSelector".to_string(), 1)]);
    }

    #[test]
    fn hooks_in_nested_callbacks_are_found() {
        let src = "function A() {\n  items.map(() => {\n    const v = useMemo(() => 1, [])\n  })\n}\n";
        assert_eq!(hooks(src), vec![("useMemo".to_string(), 3)]);
    }

    #[test]
    fn same_hook_on_same_line_collapses() {
        let src = "useA(); useA()\nuseA()\n";
        assert_eq!(
            hooks(src),
            vec![("useA".to_string(), 1), ("useA".to_string(), 2)]
        );
    }

    #[test]
    fn references_without_call_are_ignored() {
        assert!(hooks("const f = useCallback\nexport { useThing }\n").is_empty());
    }

    #[test]
    fn tagged_templates_are_not_hook_calls() {
        let src = "const box = useStyles`color: red`\nconst other = styled.useThing`x`\n";
        assert!(hooks(src).is_empty());
    }

    #[test]
    fn generic_hook_call_matches() {
        let src = "const ref = useRef<HTMLDivElement | null>(null)";
        assert_eq!(hooks(src), vec![("useRef".to_string(), 1)]);
    }
}
