/// How dropped nodes get the ordinal part of their `{palette_id}-{ordinal}` id.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum NodeIdStrategy {
    /// A per-editor counter that is never reused, even after deletions.
    #[default]
    Monotonic,
    /// Current node count plus one. Can hand out an id that a live node already
    /// carries once nodes have been deleted.
    CollectionLength,
}

/// Hands out node ordinals for one editor.
#[derive(Debug, Clone)]
pub(crate) struct NodeIdAllocator {
    strategy: NodeIdStrategy,
    next: u64,
}

impl NodeIdAllocator {
    pub(crate) fn new(strategy: NodeIdStrategy) -> Self {
        Self { strategy, next: 1 }
    }

    pub(crate) fn next_id(&mut self, palette_id: &str, node_count: usize) -> String {
        let ordinal = match self.strategy {
            NodeIdStrategy::Monotonic => {
                let ordinal = self.next;
                self.next += 1;
                ordinal
            }
            NodeIdStrategy::CollectionLength => node_count as u64 + 1,
        };
        format!("{}-{}", palette_id, ordinal)
    }
}
