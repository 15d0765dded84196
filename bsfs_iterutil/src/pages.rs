use std::vec;

/// Iterate over a collection that is fetched one page at a time.
///
/// `fetch(offset, limit)` must return at most `limit` items
/// starting at index `offset` of the collection.
/// Pages are requested with `limit` at most `page_size`,
/// and in total at most `bound` items are yielded (unbounded if [`None`]).
///
/// A page shorter than requested ends the iteration;
/// the collection is not assumed to report its total size.
/// An error is yielded once and also ends the iteration.
pub fn paginate<T, E, F>(offset: u64, bound: Option<u64>,
                         page_size: u64, fetch: F) -> Pages<T, F>
    where F: FnMut(u64, u64) -> Result<Vec<T>, E>
{
    Pages{
        fetch,
        offset,
        remaining: bound,
        page_size,
        buffer: Vec::new().into_iter(),
        done: false,
    }
}

/// Iterator returned by [`paginate`].
pub struct Pages<T, F>
{
    fetch:     F,
    offset:    u64,
    remaining: Option<u64>,
    page_size: u64,
    buffer:    vec::IntoIter<T>,
    done:      bool,
}

impl<T, E, F> Iterator for Pages<T, F>
    where F: FnMut(u64, u64) -> Result<Vec<T>, E>
{
    type Item = Result<T, E>;

    fn next(&mut self) -> Option<Self::Item>
    {
        loop {
            if let Some(item) = self.buffer.next() {
                return Some(Ok(item));
            }

            if self.done {
                return None;
            }

            let limit = match self.remaining {
                Some(remaining) => remaining.min(self.page_size),
                None            => self.page_size,
            };
            if limit == 0 {
                self.done = true;
                return None;
            }

            let mut page = match (self.fetch)(self.offset, limit) {
                Ok(page) => page,
                Err(err) => {
                    self.done = true;
                    return Some(Err(err));
                },
            };

            page.truncate(limit as usize);
            let count = page.len() as u64;
            if count < limit {
                self.done = true;
            }

            self.offset += count;
            if let Some(remaining) = &mut self.remaining {
                *remaining -= count;
            }
            self.buffer = page.into_iter();
        }
    }
}
