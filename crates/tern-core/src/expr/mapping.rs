use crate::{Error, Result};
use std::ops::Range;

/// A contiguous run of offsets into a flat row.
///
/// Scalar fields own a single offset. Composite nodes own the run formed by
/// concatenating their members' runs in declaration order.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Mapping {
    pub offset: usize,
    pub length: usize,
}

impl Mapping {
    pub const fn new(offset: usize, length: usize) -> Mapping {
        Mapping { offset, length }
    }

    pub const fn single(offset: usize) -> Mapping {
        Mapping { offset, length: 1 }
    }

    pub const fn empty() -> Mapping {
        Mapping {
            offset: 0,
            length: 0,
        }
    }

    pub const fn is_empty(&self) -> bool {
        self.length == 0
    }

    /// One past the last offset.
    pub const fn end(&self) -> usize {
        self.offset + self.length
    }

    pub fn items(&self) -> Range<usize> {
        self.offset..self.end()
    }

    pub fn contains(&self, offset: usize) -> bool {
        self.items().contains(&offset)
    }

    pub fn shift(self, offset: usize) -> Mapping {
        if self.is_empty() {
            return self;
        }

        Mapping {
            offset: self.offset + offset,
            length: self.length,
        }
    }

    /// Concatenates runs in order. Empty runs are skipped; every other run
    /// must start where the previous one ended.
    pub fn concat<'a>(mappings: impl IntoIterator<Item = &'a Mapping>) -> Result<Mapping> {
        let mut result: Option<Mapping> = None;

        for mapping in mappings {
            if mapping.is_empty() {
                continue;
            }

            result = Some(match result {
                None => *mapping,
                Some(acc) if acc.end() == mapping.offset => {
                    Mapping::new(acc.offset, acc.length + mapping.length)
                }
                Some(acc) => {
                    return Err(Error::invalid_expression(format!(
                        "mapping {mapping} does not continue {acc}"
                    )))
                }
            });
        }

        Ok(result.unwrap_or_default())
    }

    /// Moves the run to the positions its offsets occupy in `map`, where
    /// `map[i]` is the old offset now found at position `i`.
    pub fn remap_columns(self, map: &[usize]) -> Result<Mapping> {
        if self.is_empty() {
            return Ok(self);
        }

        let position = |offset: usize| {
            map.iter().position(|&old| old == offset).ok_or_else(|| {
                Error::invalid_expression(format!("offset {offset} is missing from column map"))
            })
        };

        let start = position(self.offset)?;

        for (i, offset) in self.items().enumerate().skip(1) {
            if position(offset)? != start + i {
                return Err(Error::invalid_expression(format!(
                    "mapping {self} is not contiguous after remapping"
                )));
            }
        }

        Ok(Mapping::new(start, self.length))
    }
}

impl core::fmt::Display for Mapping {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(f, "[{}..{})", self.offset, self.end())
    }
}

impl From<usize> for Mapping {
    fn from(offset: usize) -> Self {
        Mapping::single(offset)
    }
}

impl From<Range<usize>> for Mapping {
    fn from(range: Range<usize>) -> Self {
        Mapping::new(range.start, range.len())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn concat_adjacent_runs() {
        let mapping = Mapping::concat(&[Mapping::single(3), Mapping::new(4, 2), Mapping::empty()])
            .unwrap();
        assert_eq!(mapping, Mapping::new(3, 3));
        assert_eq!(mapping.items().collect::<Vec<_>>(), [3, 4, 5]);
    }

    #[test]
    fn concat_rejects_gap() {
        let err = Mapping::concat(&[Mapping::single(0), Mapping::single(2)]).unwrap_err();
        assert!(err.is_invalid_expression());
    }

    #[test]
    fn remap_columns_follows_map() {
        let map = [7, 2, 3, 0];
        assert_eq!(
            Mapping::new(2, 2).remap_columns(&map).unwrap(),
            Mapping::new(1, 2)
        );
        assert!(Mapping::single(5).remap_columns(&map).is_err());
        assert!(Mapping::new(6, 2).remap_columns(&[7, 6]).is_err());
    }
}
