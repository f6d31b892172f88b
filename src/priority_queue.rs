use std::fmt::{self, Debug, Formatter};

/// Binary heap ordered by a caller-supplied predicate.
///
/// `precedes(a, b)` returns true when `a` must be popped before `b`.
/// `BinaryHeap` needs `Ord` on the items which doesn't work well when the order
/// depends on context (the target of a path search for example).
pub(crate) struct PriorityQueue<T, F>
where
    F: Fn(&T, &T) -> bool,
{
    items: Vec<T>,
    precedes: F,
}

impl<T, F> PriorityQueue<T, F>
where
    F: Fn(&T, &T) -> bool,
{
    pub(crate) fn new(precedes: F) -> Self {
        PriorityQueue {
            items: Vec::new(),
            precedes,
        }
    }

    pub(crate) fn len(&self) -> usize {
        self.items.len()
    }

    pub(crate) fn push(&mut self, item: T) {
        self.items.push(item);

        let mut i = self.items.len() - 1;
        while i > 0 {
            let parent = (i - 1) / 2;
            if !(self.precedes)(&self.items[i], &self.items[parent]) {
                break;
            }
            self.items.swap(i, parent);
            i = parent;
        }
    }

    pub(crate) fn pop(&mut self) -> Option<T> {
        if self.items.is_empty() {
            return None;
        }

        let last = self.items.len() - 1;
        self.items.swap(0, last);
        let ret = self.items.pop();

        let len = self.items.len();
        let mut i = 0;
        loop {
            let mut first = i;
            for child in &[2 * i + 1, 2 * i + 2] {
                if *child < len && (self.precedes)(&self.items[*child], &self.items[first]) {
                    first = *child;
                }
            }
            if first == i {
                return ret;
            }
            self.items.swap(i, first);
            i = first;
        }
    }
}

impl<T: Debug, F> Debug for PriorityQueue<T, F>
where
    F: Fn(&T, &T) -> bool,
{
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.debug_struct("PriorityQueue")
            .field("items", &self.items)
            .finish()
    }
}
