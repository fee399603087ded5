use super::resolver::ResolveContext;
use crate::Candidate;

/// 候補ひとりぶんの判定結果
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FilterOperation {
    // 後段の判定に委ねる
    Next,

    // 後段の判定にかかわらず残す
    Keep,

    // 後段の判定にかかわらず除外
    Exclude,
}

pub trait IFilterDecorator {
    fn invoke(&self, candidate: &Candidate, context: &ResolveContext) -> FilterOperation;
}

// なにもしない
#[derive(Default)]
pub struct PassThrough;
impl IFilterDecorator for PassThrough {
    fn invoke(&self, _candidate: &Candidate, _context: &ResolveContext) -> FilterOperation {
        FilterOperation::Next
    }
}

// この枠ですでに選ばれている候補は常に残す
pub struct SelectedDecorator<T: IFilterDecorator> {
    decorator: T,
}

impl<T: IFilterDecorator> IFilterDecorator for SelectedDecorator<T> {
    fn invoke(&self, candidate: &Candidate, context: &ResolveContext) -> FilterOperation {
        match self.decorator.invoke(candidate, context) {
            FilterOperation::Keep => FilterOperation::Keep,
            FilterOperation::Exclude => FilterOperation::Exclude,
            FilterOperation::Next => self.invoke_impl(candidate, context),
        }
    }
}

impl<T: IFilterDecorator> SelectedDecorator<T> {
    pub fn new(decorator: T) -> Self {
        Self { decorator }
    }

    fn invoke_impl(&self, candidate: &Candidate, context: &ResolveContext) -> FilterOperation {
        if context.selected() == Some(candidate.id()) {
            FilterOperation::Keep
        } else {
            FilterOperation::Next
        }
    }
}

// 楽器・役割が枠と一致しない候補を除外
pub struct CategoryDecorator<T: IFilterDecorator> {
    decorator: T,
}

impl<T: IFilterDecorator> IFilterDecorator for CategoryDecorator<T> {
    fn invoke(&self, candidate: &Candidate, context: &ResolveContext) -> FilterOperation {
        match self.decorator.invoke(candidate, context) {
            FilterOperation::Keep => FilterOperation::Keep,
            FilterOperation::Exclude => FilterOperation::Exclude,
            FilterOperation::Next => self.invoke_impl(candidate, context),
        }
    }
}

impl<T: IFilterDecorator> CategoryDecorator<T> {
    pub fn new(decorator: T) -> Self {
        Self { decorator }
    }

    fn invoke_impl(&self, candidate: &Candidate, context: &ResolveContext) -> FilterOperation {
        // 説教やボーカルの枠は役割ごとの名簿なので絞り込まない
        let Some(category) = context.slot().category() else {
            return FilterOperation::Next;
        };

        if candidate.category() == Some(category) {
            FilterOperation::Next
        } else {
            FilterOperation::Exclude
        }
    }
}

// 同じグループの別枠で選ばれている人を除外
pub struct ConflictDecorator<T: IFilterDecorator> {
    decorator: T,
}

impl<T: IFilterDecorator> IFilterDecorator for ConflictDecorator<T> {
    fn invoke(&self, candidate: &Candidate, context: &ResolveContext) -> FilterOperation {
        match self.decorator.invoke(candidate, context) {
            FilterOperation::Keep => FilterOperation::Keep,
            FilterOperation::Exclude => FilterOperation::Exclude,
            FilterOperation::Next => self.invoke_impl(candidate, context),
        }
    }
}

impl<T: IFilterDecorator> ConflictDecorator<T> {
    pub fn new(decorator: T) -> Self {
        Self { decorator }
    }

    fn invoke_impl(&self, candidate: &Candidate, context: &ResolveContext) -> FilterOperation {
        if context.is_blocked(candidate) {
            FilterOperation::Exclude
        } else {
            FilterOperation::Next
        }
    }
}
