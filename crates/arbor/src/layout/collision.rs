//! Force-directed separation of overlapping nodes.
//!
//! Works in the same abstract units as the centering phase: every node is
//! [`UNIT_WIDTH`] wide and only nodes sharing a layer are compared, since
//! they share the depth coordinate. Overlapping pairs are pushed apart
//! symmetrically until an iteration finds no overlap or the budget runs out.
//!
//! Each iteration is quadratic in the layer size. Practical behavior trees
//! have small branching factors; very wide layers make this the dominant
//! cost of the pipeline.

use log::{debug, warn};

use crate::layout::{centering::UNIT_WIDTH, context::LayoutContext};

/// Summary of a collision resolution run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct CollisionOutcome {
    /// Iterations actually run.
    pub(crate) iterations: usize,
    /// Overlapping pairs found over all iterations.
    pub(crate) collisions: usize,
    /// Whether the last iteration found no overlap.
    pub(crate) converged: bool,
}

/// Iterative pairwise collision resolver.
#[derive(Debug, Clone)]
pub(crate) struct CollisionResolver {
    padding: f32,
    max_iterations: usize,
}

impl CollisionResolver {
    /// Create a new resolver
    ///
    /// Non-finite or negative padding is treated as zero.
    pub(crate) fn new(padding: f32, max_iterations: usize) -> Self {
        let padding = if padding.is_finite() {
            padding.max(0.0)
        } else {
            0.0
        };
        Self {
            padding,
            max_iterations,
        }
    }

    /// Minimum center distance between two nodes of one layer.
    fn required_separation(&self) -> f32 {
        UNIT_WIDTH + self.padding
    }

    /// Pushes apart same-layer nodes closer than the required separation.
    pub(crate) fn resolve(&self, ctx: &mut LayoutContext<'_>) -> CollisionOutcome {
        let required = self.required_separation();
        let mut outcome = CollisionOutcome {
            iterations: 0,
            collisions: 0,
            converged: false,
        };

        for _ in 0..self.max_iterations {
            outcome.iterations += 1;
            let mut found = 0;

            for layer in &ctx.layers {
                for (i, &first) in layer.iter().enumerate() {
                    for &second in &layer[i + 1..] {
                        let first_x = ctx.nodes[first].position().x();
                        let second_x = ctx.nodes[second].position().x();
                        let distance = (second_x - first_x).abs();
                        if required <= distance {
                            continue;
                        }

                        found += 1;
                        let push = (required - distance) / 2.0;
                        // On a tie the node ranked first goes left.
                        let direction = if second_x < first_x { -1.0 } else { 1.0 };
                        ctx.nodes[first].set_x(first_x - push * direction);
                        ctx.nodes[second].set_x(second_x + push * direction);
                    }
                }
            }

            outcome.collisions += found;
            if found == 0 {
                outcome.converged = true;
                break;
            }
        }

        if outcome.converged {
            debug!(
                iterations = outcome.iterations,
                collisions = outcome.collisions;
                "Collision resolution converged"
            );
        } else if self.max_iterations > 0 {
            warn!(
                iterations = outcome.iterations,
                collisions = outcome.collisions;
                "Collision resolution stopped before reaching a fixed point"
            );
        }

        outcome
    }
}
