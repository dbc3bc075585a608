// overly complicated due to async-trait
macro_rules! rpc_mock_fn {
    ( $stname:ident, $fname:ident, $rname:ident, $in:ty, $out:ty ) => {
        fn $fname<'life0, 'async_trait>(
            &'life0 self,
            req: tonic::Request<$in>,
        ) -> core::pin::Pin<
            Box<
                (dyn core::future::Future<Output = Result<tonic::Response<$out>, tonic::Status>>
                     + Send
                     + 'async_trait),
            >,
        >
        where
            'life0: 'async_trait,
        {
            async fn f(
                _self: &$stname,
                req: tonic::Request<$in>,
            ) -> Result<tonic::Response<$out>, tonic::Status> {
                _self.record(stringify!($fname), &req);
                let res = match _self.$rname.clone() {
                    Ok(x) => Ok(tonic::Response::new(x)),
                    Err(x) => Err(tonic::Status::new(x.0, x.1)),
                };
                log::debug!(
                    "{}::{}: received {:?}, responding {:?}",
                    std::any::type_name::<$stname>(),
                    stringify!($fname),
                    req,
                    res
                );
                res
            }
            Box::pin(f(self, req))
        }
    };
}

macro_rules! rpc_mock_setters {
    ( $fname:ident, $rname:ident, $in:ty, $out:ty ) => {
        paste::paste! {
            pub fn [<$fname _set>] (&mut self, val: $out) {
                self.$rname = Ok(val);
            }
            pub fn [<$fname _set_err>] (&mut self, val: tonic::Status) {
                self.$rname = Err((val.code(),val.message().to_string()));
            }
        }
    };
}

/// A call received by a mock service.
#[derive(Debug, Clone, PartialEq)]
pub struct MockCall {
    pub method: &'static str,
    /// value of the `user` metadata entry, if present
    pub user: Option<String>,
    pub request: String,
}

#[macro_export]
macro_rules! rpc_mock_server {
    ( $trait:ty; $stname:ident; $( ($fname:ident, $in:ty, $out:ty) ),* ) => {
        paste::paste!{
            #[derive(Debug, Clone)]
            pub struct $stname {
                calls: std::sync::Arc<std::sync::Mutex<Vec<$crate::MockCall>>>,
                $(
                    [<$fname _return>] : Result<$out,(tonic::Code,String)>,
                )*
            }
            impl $trait for $stname {
                $(
                    rpc_mock_fn!($stname, $fname, [<$fname _return>], $in, $out);
                )*
            }
            impl $stname {
                $(
                    rpc_mock_setters!($fname,[<$fname _return>],$in,$out);
                )*

                fn record<T: std::fmt::Debug>(&self, method: &'static str, req: &tonic::Request<T>) {
                    let user = req
                        .metadata()
                        .get("user")
                        .and_then(|v| v.to_str().ok())
                        .map(String::from);
                    if let Ok(mut calls) = self.calls.lock() {
                        calls.push($crate::MockCall {
                            method,
                            user,
                            request: format!("{:?}", req.get_ref()),
                        });
                    }
                }

                /// Calls received so far, shared between clones of this mock.
                pub fn calls(&self) -> Vec<$crate::MockCall> {
                    self.calls.lock().map(|c| c.clone()).unwrap_or_default()
                }

                pub fn calls_to(&self, method: &str) -> Vec<$crate::MockCall> {
                    self.calls()
                        .into_iter()
                        .filter(|c| c.method == method)
                        .collect()
                }
            }
            impl Default for $stname {
                fn default() -> Self {
                    Self {
                        calls: Default::default(),
                        $(
                            [<$fname _return>] : Err((tonic::Code::Internal,String::from("the response for this mock method was not set"))),
                        )*
                    }
                }
            }
        }
    }
}
