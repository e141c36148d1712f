//! Arity-erased constructors for dependency bundles.
//!
//! A feature declares its dependencies as a plain struct built by a function taking
//! zero to six `Rc<T>` parameters. [`DependenciesInitializer`] wraps that function
//! behind a single `build(store)` call that resolves every parameter from a
//! [`Store`], left to right.

use std::any::{type_name, Any};
use std::fmt;
use std::rc::Rc;

use crate::error::{ResolutionError, ResolutionResult};
use crate::store::{Store, StoreExt};

type BuildFn = Box<dyn Fn(&dyn Store) -> ResolutionResult<Box<dyn Any>>>;

/// Type-erased builder for a dependency bundle.
///
/// # Example
///
/// ```rust
/// use router_service::{DependenciesInitializer, DependencyStore, StoreExt};
/// use std::rc::Rc;
///
/// struct Api;
/// struct Cache;
///
/// struct Dependencies {
///     api: Rc<Api>,
///     cache: Rc<Cache>,
/// }
///
/// fn dependencies(api: Rc<Api>, cache: Rc<Cache>) -> Dependencies {
///     Dependencies { api, cache }
/// }
///
/// let store = DependencyStore::new();
/// store.register::<Cache, _>(|| Rc::new(Cache));
/// store.register::<Api, _>(|| Rc::new(Api));
///
/// let initializer = DependenciesInitializer::new(dependencies);
/// assert_eq!(initializer.arity(), 2);
/// let bundle: Dependencies = initializer.build_as(&store).unwrap();
/// ```
pub struct DependenciesInitializer {
    arity: usize,
    output: &'static str,
    build: BuildFn,
}

impl DependenciesInitializer {
    /// Wrap a constructor of any supported arity.
    pub fn new<Args, F>(function: F) -> Self
    where
        F: IntoInitializer<Args>,
    {
        function.into_initializer()
    }

    /// Wrap a constructor taking exactly one dependency.
    ///
    /// Equivalent to [`new`](Self::new), but pins the arity so closures with an
    /// unannotated parameter still infer.
    pub fn single<A, Output, F>(function: F) -> Self
    where
        A: ?Sized + 'static,
        Output: 'static,
        F: Fn(Rc<A>) -> Output + 'static,
    {
        IntoInitializer::<(Rc<A>,)>::into_initializer(function)
    }

    fn from_fn(
        arity: usize,
        output: &'static str,
        build: impl Fn(&dyn Store) -> ResolutionResult<Box<dyn Any>> + 'static,
    ) -> Self {
        Self {
            arity,
            output,
            build: Box::new(build),
        }
    }

    /// Resolve every parameter and run the constructor.
    pub fn build(&self, store: &dyn Store) -> ResolutionResult<Box<dyn Any>> {
        (self.build)(store)
    }

    /// Build and downcast to the expected bundle type.
    pub fn build_as<T: 'static>(&self, store: &dyn Store) -> ResolutionResult<T> {
        self.build(store)?
            .downcast::<T>()
            .map(|bundle| *bundle)
            .map_err(|_| ResolutionError::DependenciesMismatch {
                feature: self.output,
                expected: type_name::<T>(),
            })
    }

    /// Number of dependencies the constructor takes.
    pub fn arity(&self) -> usize {
        self.arity
    }

    /// Name of the bundle type the constructor returns.
    pub fn output_type(&self) -> &'static str {
        self.output
    }
}

impl fmt::Debug for DependenciesInitializer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DependenciesInitializer")
            .field("arity", &self.arity)
            .field("output", &self.output)
            .finish()
    }
}

/// Conversion from a constructor function into a [`DependenciesInitializer`].
///
/// `Args` is the tuple of `Rc<T>` parameters; it only exists to keep the
/// per-arity implementations apart.
pub trait IntoInitializer<Args> {
    /// Erase the constructor.
    fn into_initializer(self) -> DependenciesInitializer;
}

fn inject<T: ?Sized + 'static>(
    store: &dyn Store,
    requested_by: &'static str,
) -> ResolutionResult<Rc<T>> {
    store.get::<T>().ok_or(ResolutionError::MissingDependency {
        dependency: type_name::<T>(),
        requested_by,
    })
}

macro_rules! impl_into_initializer {
    ($arity:expr; $($param:ident),*) => {
        impl<Func, Output, $($param),*> IntoInitializer<($(Rc<$param>,)*)> for Func
        where
            Func: Fn($(Rc<$param>),*) -> Output + 'static,
            Output: 'static,
            $($param: ?Sized + 'static,)*
        {
            #[allow(non_snake_case, unused_variables)]
            fn into_initializer(self) -> DependenciesInitializer {
                DependenciesInitializer::from_fn($arity, type_name::<Output>(), move |store| {
                    $(let $param = inject::<$param>(store, type_name::<Output>())?;)*
                    Ok(Box::new(self($($param),*)) as Box<dyn Any>)
                })
            }
        }
    };
}

impl_into_initializer!(0;);
impl_into_initializer!(1; A);
impl_into_initializer!(2; A, B);
impl_into_initializer!(3; A, B, C);
impl_into_initializer!(4; A, B, C, D);
impl_into_initializer!(5; A, B, C, D, E);
impl_into_initializer!(6; A, B, C, D, E, F);
