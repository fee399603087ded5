mod duration;
mod filter_decorators;
mod resolver;
mod selection;

pub use duration::{DurationAggregator, TotalDuration};
pub use filter_decorators::{
    CategoryDecorator, ConflictDecorator, FilterOperation, IFilterDecorator, PassThrough,
    SelectedDecorator,
};
pub use resolver::{AssignmentResolver, Conflict, ConflictKey, ResolveContext};
pub use selection::Selections;
