use metadata::{Module, TypeId};
use std::collections::VecDeque;

/// Every type in `module`, roots first and then nested types level by level.
///
/// Uses an explicit queue so arbitrarily deep nesting cannot exhaust the
/// stack. Each type appears exactly once because nesting is a tree.
pub fn all_types(module: &Module) -> Vec<TypeId> {
    let mut result = Vec::with_capacity(module.type_count());
    let mut frontier: VecDeque<TypeId> = module.roots().iter().copied().collect();

    while let Some(id) = frontier.pop_front() {
        result.push(id);
        frontier.extend(module[id].nested_types().iter().copied());
    }

    result
}
