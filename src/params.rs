use crate::Result;

pub type Completion<'a, T> = Box<dyn FnOnce(Result<T>) + 'a>;

/// Everything a read request carries: the resource, an optional size hint
/// and the completion to notify. The completion runs before the read call
/// returns.
pub struct ReadParams<'a, T> {
    pub path: String,
    /// Accepted for host compatibility, never used to limit the read.
    pub size_hint: usize,
    completion: Completion<'a, T>,
}

impl<'a, T> ReadParams<'a, T> {
    pub fn new(
        path: impl Into<String>,
        completion: impl FnOnce(Result<T>) + 'a,
    ) -> Self {
        Self {
            path: path.into(),
            size_hint: 0,
            completion: Box::new(completion),
        }
    }

    pub fn with_size_hint(mut self, size_hint: usize) -> Self {
        self.size_hint = size_hint;
        self
    }

    pub fn complete(self, outcome: Result<T>) {
        (self.completion)(outcome)
    }
}

impl<T> std::fmt::Debug for ReadParams<'_, T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ReadParams")
            .field("path", &self.path)
            .field("size_hint", &self.size_hint)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::EmmetIoError;
    use std::cell::RefCell;

    #[test]
    fn size_hint_defaults_to_zero() {
        let params = ReadParams::<String>::new("a.txt", |_| {});
        assert_eq!(params.path, "a.txt");
        assert_eq!(params.size_hint, 0);

        let params = params.with_size_hint(512);
        assert_eq!(params.size_hint, 512);
    }

    #[test]
    fn completion_receives_outcome() {
        let seen = RefCell::new(Vec::new());
        ReadParams::new("a.txt", |outcome: Result<String>| {
            seen.borrow_mut().push(outcome.unwrap())
        })
        .complete(Ok("content".to_owned()));
        ReadParams::new("b.txt", |outcome: Result<String>| {
            seen.borrow_mut().push(outcome.unwrap_err().to_string())
        })
        .complete(Err(EmmetIoError::Unreadable {
            path: "b.txt".to_owned(),
        }));

        assert_eq!(
            seen.into_inner(),
            vec!["content".to_owned(), "Unable to read file".to_owned()]
        );
    }
}
