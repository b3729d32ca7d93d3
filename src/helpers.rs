/// Implement [Service](crate::Service) for a type implementing [Default].
///
/// The contracts implemented by the type are listed after `=>`, and the fields holding
/// [Inject](crate::Inject) slots to fill are listed after `; inject`.
/// Both lists are optional.
///
/// ```
/// # use wirebox::{service, Inject};
/// trait Clock: Send + Sync {}
/// trait Scheduler: Send + Sync {}
///
/// #[derive(Default)]
/// struct SystemClock;
/// impl Clock for SystemClock {}
/// service!(SystemClock => dyn Clock);
///
/// #[derive(Default)]
/// struct CronScheduler {
///     clock: Inject<dyn Clock>,
/// }
/// impl Scheduler for CronScheduler {}
/// service!(CronScheduler => dyn Scheduler; inject clock);
/// ```
///
/// Declaring a contract that the type does not implement is a compile error.
#[macro_export]
macro_rules! service {
    ($concrete:ty $(=> $($contract:ty),+)? $(; inject $($slot:ident),+)?) => {
        impl $crate::Service for $concrete {
            fn create() -> ::std::result::Result<Self, $crate::BoxError> {
                ::std::result::Result::Ok(<Self as ::std::default::Default>::default())
            }

            fn conformance() -> $crate::Conformance<Self> {
                $crate::Conformance::new()
                    $($(.with(|this: ::std::sync::Arc<Self>| -> ::std::sync::Arc<$contract> { this }))+)?
            }

            fn slots(&self) -> ::std::vec::Vec<&dyn $crate::DependencySlot> {
                ::std::vec![$($(&self.$slot as &dyn $crate::DependencySlot),+)?]
            }
        }
    };
}
