use crate::negotiate::Dimension;
use http::{Response, StatusCode, header};
use pin_project_lite::pin_project;
use std::future::Future;
use std::pin::Pin;
use std::task::{Context, Poll};

pin_project! {
    /// Future for negotiation service responses.
    pub struct ResponseFuture<F, B> {
        #[pin]
        state: State<F, B>,
        dimensions: Vec<Dimension>,
    }
}

pin_project! {
    #[project = StateProj]
    enum State<F, B> {
        Inner {
            #[pin]
            future: F,
        },
        Rejected {
            response: Option<Response<B>>,
        },
    }
}

impl<F, B> ResponseFuture<F, B> {
    pub(crate) fn new(future: F, dimensions: Vec<Dimension>) -> Self {
        Self {
            state: State::Inner { future },
            dimensions,
        }
    }

    pub(crate) fn not_acceptable(dimensions: Vec<Dimension>) -> Self
    where
        B: Default,
    {
        let mut response = Response::new(B::default());
        *response.status_mut() = StatusCode::NOT_ACCEPTABLE;

        Self {
            state: State::Rejected {
                response: Some(response),
            },
            dimensions,
        }
    }
}

impl<F, B, E> Future for ResponseFuture<F, B>
where
    F: Future<Output = Result<Response<B>, E>>,
{
    type Output = Result<Response<B>, E>;

    fn poll(self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Self::Output> {
        let this = self.project();

        let mut response = match this.state.project() {
            StateProj::Inner { future } => match future.poll(cx) {
                Poll::Pending => return Poll::Pending,
                Poll::Ready(Err(e)) => return Poll::Ready(Err(e)),
                Poll::Ready(Ok(response)) => response,
            },
            // Built in `call`, taken on the only poll.
            StateProj::Rejected { response } => response
                .take()
                .expect("ResponseFuture polled after completion"),
        };

        for dimension in this.dimensions.iter() {
            add_vary(response.headers_mut(), dimension.vary_token());
        }

        Poll::Ready(Ok(response))
    }
}

/// Adds `token` to the Vary header unless it, or `*`, is already listed.
fn add_vary(headers: &mut header::HeaderMap, token: &'static str) {
    // Vary may be split over several header lines
    for vary in headers.get_all(header::VARY) {
        if let Ok(vary_str) = vary.to_str() {
            let listed = vary_str.split(',').any(|v| {
                let v = v.trim();
                v == "*" || v.eq_ignore_ascii_case(token)
            });
            if listed {
                return;
            }
        }
    }

    headers.append(header::VARY, header::HeaderValue::from_static(token));
}
