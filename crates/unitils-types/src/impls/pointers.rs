use std::cell::{Cell, OnceCell, Ref, RefCell};
use std::rc::{self, Rc};
use std::sync::{self, Arc, Mutex, MutexGuard, TryLockError};

use crate::error::{ReflectError, ReflectResult};
use crate::reflect::{Kind, Reflect};

// Transparent wrappers report the type of what they hold.
macro_rules! reflect_deref {
    ($($wrapper:ident),*) => {$(
        impl<T: Reflect + ?Sized> Reflect for $wrapper<T> {
            fn type_name(&self) -> &'static str {
                (**self).type_name()
            }

            fn reflect(&self) -> ReflectResult<Kind<'_>> {
                (**self).reflect()
            }
        }
    )*};
}

reflect_deref!(Box, Rc, Arc);

impl<T: Reflect + ?Sized> Reflect for &T {
    fn type_name(&self) -> &'static str {
        (**self).type_name()
    }

    fn reflect(&self) -> ReflectResult<Kind<'_>> {
        (**self).reflect()
    }
}

impl<T: Reflect + ?Sized> Reflect for &mut T {
    fn type_name(&self) -> &'static str {
        (**self).type_name()
    }

    fn reflect(&self) -> ReflectResult<Kind<'_>> {
        (**self).reflect()
    }
}

impl<T: Reflect> Reflect for Option<T> {
    fn type_name(&self) -> &'static str {
        match self {
            Some(value) => value.type_name(),
            None => std::any::type_name::<T>(),
        }
    }

    fn reflect(&self) -> ReflectResult<Kind<'_>> {
        match self {
            Some(value) => value.reflect(),
            None => Ok(Kind::Null),
        }
    }
}

// ---------------------------------------------------------------------------
// Interior mutability
// ---------------------------------------------------------------------------

impl<T: Reflect + ?Sized> Reflect for RefCell<T> {
    fn type_name(&self) -> &'static str {
        match self.try_borrow() {
            Ok(value) => value.type_name(),
            Err(_) => std::any::type_name::<T>(),
        }
    }

    fn reflect(&self) -> ReflectResult<Kind<'_>> {
        let guard = self
            .try_borrow()
            .map_err(|_| ReflectError::BorrowConflict {
                type_name: std::any::type_name::<T>(),
            })?;
        Ok(Kind::Indirect(Box::new(guard)))
    }
}

impl<T: Reflect + ?Sized> Reflect for Ref<'_, T> {
    fn type_name(&self) -> &'static str {
        (**self).type_name()
    }

    fn reflect(&self) -> ReflectResult<Kind<'_>> {
        (**self).reflect()
    }
}

impl<T: Reflect + ?Sized> Reflect for Mutex<T> {
    fn type_name(&self) -> &'static str {
        std::any::type_name::<T>()
    }

    fn reflect(&self) -> ReflectResult<Kind<'_>> {
        let guard = match self.try_lock() {
            Ok(guard) => guard,
            Err(TryLockError::Poisoned(poisoned)) => poisoned.into_inner(),
            Err(TryLockError::WouldBlock) => {
                return Err(ReflectError::BorrowConflict {
                    type_name: std::any::type_name::<T>(),
                })
            }
        };
        Ok(Kind::Indirect(Box::new(guard)))
    }
}

impl<T: Reflect + ?Sized> Reflect for MutexGuard<'_, T> {
    fn type_name(&self) -> &'static str {
        (**self).type_name()
    }

    fn reflect(&self) -> ReflectResult<Kind<'_>> {
        (**self).reflect()
    }
}

impl<T: Reflect + Copy> Reflect for Cell<T> {
    fn type_name(&self) -> &'static str {
        self.get().type_name()
    }

    fn reflect(&self) -> ReflectResult<Kind<'_>> {
        Ok(Kind::Copied(Box::new(self.get())))
    }
}

impl<T: Reflect> Reflect for OnceCell<T> {
    fn type_name(&self) -> &'static str {
        match self.get() {
            Some(value) => value.type_name(),
            None => std::any::type_name::<T>(),
        }
    }

    fn reflect(&self) -> ReflectResult<Kind<'_>> {
        match self.get() {
            Some(value) => value.reflect(),
            None => Ok(Kind::Null),
        }
    }
}

// ---------------------------------------------------------------------------
// Weak references
// ---------------------------------------------------------------------------

impl<T: Reflect> Reflect for rc::Weak<T> {
    fn type_name(&self) -> &'static str {
        std::any::type_name::<T>()
    }

    fn reflect(&self) -> ReflectResult<Kind<'_>> {
        Ok(match self.upgrade() {
            Some(strong) => Kind::Indirect(Box::new(strong)),
            None => Kind::Null,
        })
    }
}

impl<T: Reflect> Reflect for sync::Weak<T> {
    fn type_name(&self) -> &'static str {
        std::any::type_name::<T>()
    }

    fn reflect(&self) -> ReflectResult<Kind<'_>> {
        Ok(match self.upgrade() {
            Some(strong) => Kind::Indirect(Box::new(strong)),
            None => Kind::Null,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::reflect::{with_kind, Identity};

    #[test]
    fn option_and_box_are_transparent() {
        let some: Option<Box<i32>> = Some(Box::new(3));
        assert!(matches!(some.reflect().unwrap(), Kind::Number(_)));
        assert_eq!(some.type_name(), "i32");
        let none: Option<Box<i32>> = None;
        assert!(none.reflect().unwrap().is_null());
    }

    #[test]
    fn refcell_reflects_through_a_guard() {
        let cell = RefCell::new(String::from("x"));
        let s = with_kind(&cell, |kind| matches!(kind, Kind::Str("x"))).unwrap();
        assert!(s);
        let _writer = cell.borrow_mut();
        assert_eq!(
            cell.reflect().unwrap_err(),
            ReflectError::BorrowConflict {
                type_name: "alloc::string::String"
            }
        );
    }

    #[test]
    fn refcell_contents_keep_a_stable_identity() {
        let cell = RefCell::new(vec![1, 2]);
        let first = with_kind(&cell, |kind| kind.identity()).unwrap();
        let second = with_kind(&cell, |kind| kind.identity()).unwrap();
        assert_eq!(first, second);
        assert_eq!(first, Some(Identity::of(&*cell.borrow())));
    }

    #[test]
    fn dropped_weak_is_null() {
        let strong = Rc::new(7u8);
        let weak = Rc::downgrade(&strong);
        assert!(with_kind(&weak, |kind| matches!(kind, Kind::Number(_))).unwrap());
        drop(strong);
        assert!(weak.reflect().unwrap().is_null());
    }

    #[test]
    fn held_mutex_is_a_conflict() {
        let mutex = Mutex::new(1u32);
        assert!(with_kind(&mutex, |kind| matches!(kind, Kind::Number(_))).unwrap());
        let _held = mutex.lock();
        assert!(matches!(mutex.reflect(), Err(ReflectError::BorrowConflict { .. })));
    }

    #[test]
    fn cell_and_once_cell() {
        let cell = Cell::new(true);
        assert!(with_kind(&cell, |kind| matches!(kind, Kind::Bool(true))).unwrap());
        assert!(matches!(Cell::new((1, 2)).reflect().unwrap(), Kind::Copied(_)));
        let once: OnceCell<i32> = OnceCell::new();
        assert!(once.reflect().unwrap().is_null());
        let _ = once.set(4);
        assert!(matches!(once.reflect().unwrap(), Kind::Number(_)));
    }
}
