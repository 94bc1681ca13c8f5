//! Minimal compile-time dependency injection.
//!
//! Services derive [`Build`] and are assembled by a provider declared with
//! [`provider!`]. Every built value is cached in the provider, so all
//! dependents of a service share the same instance.

extern crate self as folio_di;

pub use folio_di_derive::Build;
pub use typemap::TypeMap;

mod macros;
mod typemap;

pub trait Provider: Sized {
    fn cache(&mut self) -> &mut TypeMap;
}

#[diagnostic::on_unimplemented(
    message = "The type `{Self}` cannot be built using the provider `{P}`",
    note = "Add `{Self}` to the provider `{P}` or implement `Build` for `{Self}` and make sure \
            all dependencies are satisfied"
)]
pub trait Build<P: Provider>: Clone + 'static {
    fn build(provider: &mut P) -> Self;
}

pub trait Provides<T>: Provider {
    fn provide(&mut self) -> T;
}

impl<P: Provider, T: Build<P>> Provides<T> for P {
    fn provide(&mut self) -> T {
        T::build(self)
    }
}

#[cfg(test)]
mod tests {
    use std::sync::{
        atomic::{AtomicUsize, Ordering},
        Arc,
    };

    use super::*;

    #[derive(Debug, Clone)]
    struct Greeting(&'static str);

    #[derive(Debug, Clone, Default)]
    struct Counter(Arc<AtomicUsize>);

    #[derive(Debug, Clone, Build)]
    struct Greeter {
        greeting: Greeting,
        #[state]
        counter: Counter,
    }

    #[derive(Debug, Clone, Build)]
    struct App {
        a: Greeter,
        b: Greeter,
    }

    provider! {
        TestProvider { greeting: Greeting, }
    }

    #[test]
    fn provide_cached() {
        let mut provider = TestProvider {
            _state: Default::default(),
            greeting: Greeting("hello"),
        };

        let app: App = provider.provide();
        app.a.counter.0.fetch_add(1, Ordering::Relaxed);

        assert_eq!(app.a.greeting.0, "hello");
        assert_eq!(app.b.counter.0.load(Ordering::Relaxed), 1);
    }
}
