use std::collections::{BTreeMap, BTreeSet, HashMap, HashSet, LinkedList, VecDeque};

use crate::error::ReflectResult;
use crate::reflect::{Field, Identity, Kind, MapView, ObjectView, Reflect, SeqView};

fn items<'a, T, I>(items: I) -> Vec<&'a dyn Reflect>
where
    T: Reflect + 'a,
    I: IntoIterator<Item = &'a T>,
{
    items.into_iter().map(|item| item as &dyn Reflect).collect()
}

fn seq<'a, T, I>(identity: Identity, elements: I) -> ReflectResult<Kind<'a>>
where
    T: Reflect + 'a,
    I: IntoIterator<Item = &'a T>,
{
    Ok(Kind::Seq(SeqView::new(identity, items(elements))))
}

fn map<'a, K, V, I>(identity: Identity, entries: I) -> ReflectResult<Kind<'a>>
where
    K: Reflect + 'a,
    V: Reflect + 'a,
    I: IntoIterator<Item = (&'a K, &'a V)>,
{
    Ok(Kind::Map(MapView::new(
        identity,
        entries
            .into_iter()
            .map(|(k, v)| (k as &dyn Reflect, v as &dyn Reflect))
            .collect(),
    )))
}

// ---------------------------------------------------------------------------
// Sequences
// ---------------------------------------------------------------------------

impl<T: Reflect> Reflect for [T] {
    fn reflect(&self) -> ReflectResult<Kind<'_>> {
        seq(Identity::of(self), self)
    }
}

impl<T: Reflect, const N: usize> Reflect for [T; N] {
    fn reflect(&self) -> ReflectResult<Kind<'_>> {
        seq(Identity::of(self), self)
    }
}

impl<T: Reflect> Reflect for Vec<T> {
    fn reflect(&self) -> ReflectResult<Kind<'_>> {
        seq(Identity::of(self), self)
    }
}

impl<T: Reflect> Reflect for VecDeque<T> {
    fn reflect(&self) -> ReflectResult<Kind<'_>> {
        seq(Identity::of(self), self)
    }
}

impl<T: Reflect> Reflect for LinkedList<T> {
    fn reflect(&self) -> ReflectResult<Kind<'_>> {
        seq(Identity::of(self), self)
    }
}

// Iteration order depends on the hasher's seed.
impl<T: Reflect, S> Reflect for HashSet<T, S> {
    fn reflect(&self) -> ReflectResult<Kind<'_>> {
        Ok(Kind::Seq(SeqView::unordered(Identity::of(self), items(self))))
    }
}

impl<T: Reflect> Reflect for BTreeSet<T> {
    fn reflect(&self) -> ReflectResult<Kind<'_>> {
        seq(Identity::of(self), self)
    }
}

// ---------------------------------------------------------------------------
// Maps
// ---------------------------------------------------------------------------

impl<K: Reflect, V: Reflect, S> Reflect for HashMap<K, V, S> {
    fn reflect(&self) -> ReflectResult<Kind<'_>> {
        map(Identity::of(self), self)
    }
}

impl<K: Reflect, V: Reflect> Reflect for BTreeMap<K, V> {
    fn reflect(&self) -> ReflectResult<Kind<'_>> {
        map(Identity::of(self), self)
    }
}

// ---------------------------------------------------------------------------
// Tuples
// ---------------------------------------------------------------------------

macro_rules! reflect_tuple {
    ($($name:ident $idx:tt),+) => {
        impl<$($name: Reflect),+> Reflect for ($($name,)+) {
            fn reflect(&self) -> ReflectResult<Kind<'_>> {
                Ok(Kind::Object(ObjectView::new(
                    Identity::of(self),
                    std::any::type_name::<Self>(),
                    vec![$(Field::new(stringify!($idx), &self.$idx)),+],
                )))
            }
        }
    };
}

reflect_tuple!(A 0);
reflect_tuple!(A 0, B 1);
reflect_tuple!(A 0, B 1, C 2);
reflect_tuple!(A 0, B 1, C 2, D 3);
reflect_tuple!(A 0, B 1, C 2, D 3, E 4);
reflect_tuple!(A 0, B 1, C 2, D 3, E 4, F 5);
reflect_tuple!(A 0, B 1, C 2, D 3, E 4, F 5, G 6);
reflect_tuple!(A 0, B 1, C 2, D 3, E 4, F 5, G 6, H 7);
