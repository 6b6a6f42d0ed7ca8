use crate::shared::{shared, Shared};
use std::fmt::{self, Display, Formatter};
use std::rc::Rc;
use typed_list::Type;

/// A dense float64 array of any dimensionality, stored flat in row-major order.
#[derive(Debug, Clone, PartialEq)]
pub struct NdArray {
    shape: Vec<usize>,
    data: Vec<f64>,
}

impl NdArray {
    pub fn zeros(shape: &[usize]) -> Self {
        Self {
            shape: shape.to_vec(),
            data: vec![0.0; shape.iter().product()],
        }
    }

    pub fn from_vec(data: Vec<f64>) -> Self {
        Self {
            shape: vec![data.len()],
            data,
        }
    }
}

/// Shared handle to an [`NdArray`].
#[derive(Clone)]
pub struct ArrayRef {
    inner: Shared<NdArray>,
}

impl ArrayRef {
    pub fn new(array: NdArray) -> Self {
        Self {
            inner: shared(array),
        }
    }

    pub fn zeros(shape: &[usize]) -> Self {
        Self::new(NdArray::zeros(shape))
    }

    pub fn from_vec(data: Vec<f64>) -> Self {
        Self::new(NdArray::from_vec(data))
    }

    pub fn ty(&self) -> Type {
        Type::array(Type::Float64, self.ndim())
    }

    pub fn ndim(&self) -> usize {
        self.inner.borrow().shape.len()
    }

    pub fn shape(&self) -> Vec<usize> {
        self.inner.borrow().shape.clone()
    }

    pub fn size(&self) -> usize {
        self.inner.borrow().data.len()
    }

    /// Element at a flat row-major offset.
    pub fn get(&self, offset: usize) -> Option<f64> {
        self.inner.borrow().data.get(offset).copied()
    }

    /// Overwrite the element at a flat offset; `false` when out of bounds.
    pub fn set(&self, offset: usize, value: f64) -> bool {
        match self.inner.borrow_mut().data.get_mut(offset) {
            Some(slot) => {
                *slot = value;
                true
            }
            None => false,
        }
    }

    pub fn to_vec(&self) -> Vec<f64> {
        self.inner.borrow().data.clone()
    }

    pub fn refcount(&self) -> usize {
        Rc::strong_count(&self.inner)
    }

    pub fn ptr_eq(&self, other: &ArrayRef) -> bool {
        Rc::ptr_eq(&self.inner, &other.inner)
    }
}

impl PartialEq for ArrayRef {
    fn eq(&self, other: &Self) -> bool {
        self.ptr_eq(other) || *self.inner.borrow() == *other.inner.borrow()
    }
}

impl fmt::Debug for ArrayRef {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self)
    }
}

impl Display for ArrayRef {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        let array = self.inner.borrow();
        write!(f, "array([")?;
        for (i, x) in array.data.iter().enumerate() {
            if i > 0 {
                write!(f, ", ")?;
            }
            write!(f, "{:?}", x)?;
        }
        write!(f, "], shape={:?})", array.shape)
    }
}
