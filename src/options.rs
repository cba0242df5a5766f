use crate::error::ConfigurationError;
use crate::hash_provider::FnHash;
use crate::hash_provider::PolynomialHash;
use crate::hash_table::HOP_RANGE;

/// Upper load factor bound used unless configured otherwise.
pub const DEFAULT_MAX_LOAD_FACTOR: f64 = 0.75;

/// Lower load factor bound used unless configured otherwise.
pub const DEFAULT_MIN_LOAD_FACTOR: f64 = 0.25;

/// Capacity used unless configured otherwise; also the smallest capacity a
/// map accepts.
pub const DEFAULT_CAPACITY: usize = HOP_RANGE;

/// Validated pair of load factor bounds.
///
/// Both bounds lie in `(0, 1]` and `min < max`. A map grows when inserting
/// would take its load factor above `max`, and shrinks when a removal takes
/// it below `min`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LoadFactors {
    max: f64,
    min: f64,
}

impl LoadFactors {
    /// Validates and pairs the bounds.
    pub fn new(max: f64, min: f64) -> Result<Self, ConfigurationError> {
        let in_range = |factor: f64| factor > 0.0 && factor <= 1.0;
        if in_range(max) && in_range(min) && min < max {
            Ok(Self { max, min })
        } else {
            Err(ConfigurationError::InvalidLoadFactors { max, min })
        }
    }

    /// The upper bound.
    pub fn max(&self) -> f64 {
        self.max
    }

    /// The lower bound.
    pub fn min(&self) -> f64 {
        self.min
    }

    pub(crate) fn exceeds_max(&self, len: usize, capacity: usize) -> bool {
        len as f64 / capacity as f64 > self.max
    }

    pub(crate) fn below_min(&self, len: usize, capacity: usize) -> bool {
        (len as f64 / capacity as f64) < self.min
    }
}

impl Default for LoadFactors {
    fn default() -> Self {
        Self {
            max: DEFAULT_MAX_LOAD_FACTOR,
            min: DEFAULT_MIN_LOAD_FACTOR,
        }
    }
}

/// Construction parameters for a [`HashMap`](crate::HashMap).
///
/// Nothing is validated until the options are handed to
/// [`HashMap::with_options`](crate::HashMap::with_options).
///
/// ```
/// use hopscotch_table::HashMap;
/// use hopscotch_table::Options;
///
/// let options = Options::new()
///     .initial_capacity(128)
///     .load_factors(0.9, 0.1)
///     .hash_fn(|key: &u32| *key as usize);
/// let map: HashMap<u32, &str, _> = HashMap::with_options(options).unwrap();
/// assert_eq!(map.capacity(), 128);
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Options<P = PolynomialHash> {
    pub(crate) hash_provider: P,
    pub(crate) initial_capacity: usize,
    pub(crate) max_load_factor: f64,
    pub(crate) min_load_factor: f64,
}

impl Options {
    /// Default options: the polynomial hash, [`DEFAULT_CAPACITY`] slots and
    /// the default load factors.
    pub fn new() -> Self {
        Self::default()
    }
}

impl Default for Options {
    fn default() -> Self {
        Self {
            hash_provider: PolynomialHash,
            initial_capacity: DEFAULT_CAPACITY,
            max_load_factor: DEFAULT_MAX_LOAD_FACTOR,
            min_load_factor: DEFAULT_MIN_LOAD_FACTOR,
        }
    }
}

impl<P> Options<P> {
    /// Sets the number of slots the map starts with. Shrinking never goes
    /// below it.
    pub fn initial_capacity(mut self, capacity: usize) -> Self {
        self.initial_capacity = capacity;
        self
    }

    /// Sets the upper and lower load factor bounds.
    pub fn load_factors(mut self, max: f64, min: f64) -> Self {
        self.max_load_factor = max;
        self.min_load_factor = min;
        self
    }

    /// Replaces the hash provider.
    pub fn hash_provider<Q>(self, hash_provider: Q) -> Options<Q> {
        Options {
            hash_provider,
            initial_capacity: self.initial_capacity,
            max_load_factor: self.max_load_factor,
            min_load_factor: self.min_load_factor,
        }
    }

    /// Hashes keys with `hash_fn`, reducing its result modulo the capacity.
    pub fn hash_fn<F>(self, hash_fn: F) -> Options<FnHash<F>> {
        self.hash_provider(FnHash(hash_fn))
    }

    pub(crate) fn validated_load_factors(&self) -> Result<LoadFactors, ConfigurationError> {
        LoadFactors::new(self.max_load_factor, self.min_load_factor)
    }
}
