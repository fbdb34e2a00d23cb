use std::borrow::Cow;

use crate::error::ReflectResult;
use crate::number::Number;
use crate::reflect::{Kind, Reflect};

macro_rules! reflect_number {
    ($($t:ty),*) => {$(
        impl Reflect for $t {
            fn reflect(&self) -> ReflectResult<Kind<'_>> {
                Ok(Kind::Number(Number::from(*self)))
            }
        }
    )*};
}

reflect_number!(i8, i16, i32, i64, i128, isize, u8, u16, u32, u64, u128, usize, f32, f64);

impl Reflect for bool {
    fn reflect(&self) -> ReflectResult<Kind<'_>> {
        Ok(Kind::Bool(*self))
    }
}

impl Reflect for char {
    fn reflect(&self) -> ReflectResult<Kind<'_>> {
        Ok(Kind::Char(*self))
    }
}

impl Reflect for str {
    fn reflect(&self) -> ReflectResult<Kind<'_>> {
        Ok(Kind::Str(self))
    }
}

impl Reflect for String {
    fn reflect(&self) -> ReflectResult<Kind<'_>> {
        Ok(Kind::Str(self.as_str()))
    }
}

impl Reflect for Cow<'_, str> {
    fn type_name(&self) -> &'static str {
        std::any::type_name::<String>()
    }

    fn reflect(&self) -> ReflectResult<Kind<'_>> {
        Ok(Kind::Str(self.as_ref()))
    }
}

impl Reflect for () {
    fn reflect(&self) -> ReflectResult<Kind<'_>> {
        Ok(Kind::Null)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn numbers_of_any_width_classify_as_number() {
        assert!(matches!(5u8.reflect().unwrap(), Kind::Number(Number::Integer(5))));
        assert!(matches!(2.5f32.reflect().unwrap(), Kind::Number(Number::Float(f)) if f == 2.5));
        assert!(matches!(u128::MAX.reflect().unwrap(), Kind::Number(Number::Unsigned(_))));
    }

    #[test]
    fn strings_borrow_their_contents() {
        let owned = String::from("hello");
        assert!(matches!(owned.reflect().unwrap(), Kind::Str("hello")));
        let cow: Cow<'_, str> = Cow::Borrowed("hi");
        assert!(matches!(cow.reflect().unwrap(), Kind::Str("hi")));
        assert_eq!(cow.type_name(), owned.type_name());
    }

    #[test]
    fn unit_is_null() {
        assert!(().reflect().unwrap().is_null());
    }
}
