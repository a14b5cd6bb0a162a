//! Candidate enumeration.

use crate::resolve::MemberSelector;
use crate::types::{MemberDescriptor, TypeDescriptor};

/// Members of `target` that `selector` could refer to, before any
/// parameter filtering.
///
/// Constructors are every constructor of the type. Methods are every method
/// whose name equals the selector's name exactly (case-sensitive). Both come
/// out in declaration order.
pub fn candidates<'t, 'n>(
    target: &'t TypeDescriptor,
    selector: MemberSelector<'n>,
) -> impl Iterator<Item = &'t MemberDescriptor> + 'n
where
    't: 'n,
{
    let members = match selector {
        MemberSelector::Constructor => target.constructors(),
        MemberSelector::Method(_) => target.methods(),
    };
    members.iter().filter(move |m| selector.admits(m))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::ParamDescriptor;

    fn widget() -> TypeDescriptor {
        TypeDescriptor::new("Widget")
            .with_constructor(vec![])
            .with_constructor(vec![ParamDescriptor::new("size", "int")])
            .with_method("Init", vec![ParamDescriptor::new("size", "int")])
            .with_method("init", vec![])
            .with_method("Reset", vec![])
            .with_method("Init", vec![])
    }

    #[test]
    fn test_constructors_in_declaration_order() {
        let ty = widget();
        let arities: Vec<_> = candidates(&ty, MemberSelector::Constructor)
            .map(|c| c.arity())
            .collect();
        assert_eq!(arities, vec![0, 1]);
    }

    #[test]
    fn test_methods_filtered_by_exact_name() {
        let ty = widget();
        let arities: Vec<_> = candidates(&ty, MemberSelector::Method("Init"))
            .map(|c| c.arity())
            .collect();
        assert_eq!(arities, vec![1, 0]);
    }

    #[test]
    fn test_unknown_method_yields_nothing() {
        let ty = widget();
        assert_eq!(candidates(&ty, MemberSelector::Method("Missing")).count(), 0);
    }
}
