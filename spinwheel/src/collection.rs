//! A [Collection] names the prizes that a simulated sequence of draws must contain, each at
//! least once, to count as a success.

use crate::error::UnknownPrize;
use crate::weight::Distribution;

#[derive(Debug, Clone, PartialEq)]
pub enum Collection {
    Everything,
    Subset(Vec<usize>),
}
impl Collection {
    pub fn prize(index: usize) -> Self {
        Self::Subset(vec![index])
    }

    /// Resolves prize names against the distribution.
    pub fn of<'a>(
        distribution: &Distribution,
        names: impl IntoIterator<Item = &'a str>,
    ) -> Result<Self, UnknownPrize> {
        let indices = names
            .into_iter()
            .map(|name| {
                distribution
                    .index_of(name)
                    .ok_or_else(|| UnknownPrize(name.into()))
            })
            .collect::<Result<_, _>>()?;
        Ok(Self::Subset(indices))
    }

    /// Flags the outstanding prizes in `bitmap` and returns how many there are.
    #[inline]
    pub fn mark(&self, bitmap: &mut [bool]) -> usize {
        match self {
            Collection::Everything => {
                bitmap.fill(true);
                bitmap.len()
            }
            Collection::Subset(indices) => {
                bitmap.fill(false);
                let mut outstanding = 0;
                for &index in indices {
                    debug_assert!(index < bitmap.len(), "prize {index} out of range");
                    if !bitmap[index] {
                        bitmap[index] = true;
                        outstanding += 1;
                    }
                }
                outstanding
            }
        }
    }
}
