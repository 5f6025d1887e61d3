use proc_macro2::TokenStream as TokenStream2;
use quote::quote;
use syn::{Data, DeriveInput, Expr, Fields, Ident};

/// The tags of the `error` attribute.
#[derive(Default)]
struct Tags {
    message: Option<Expr>,
    labels: Option<Expr>,
    help: Option<Expr>,
}

impl Tags {
    fn from_attrs(input: &DeriveInput) -> syn::Result<Self> {
        let mut tags = Self::default();
        for attr in input.attrs.iter().filter(|attr| attr.path().is_ident("error")) {
            attr.parse_nested_meta(|meta| {
                let slot = if meta.path.is_ident("message") {
                    &mut tags.message
                } else if meta.path.is_ident("labels") {
                    &mut tags.labels
                } else if meta.path.is_ident("help") {
                    &mut tags.help
                } else {
                    return Err(meta.error("expected `message`, `labels` or `help`"));
                };
                *slot = Some(meta.value()?.parse()?);
                Ok(())
            })?;
        }
        Ok(tags)
    }
}

/// Brings the named fields of the struct into scope as local bindings.
fn bind_fields(name: &Ident, fields: &Fields) -> syn::Result<TokenStream2> {
    match fields {
        Fields::Named(named) => {
            let idents = named.named.iter().filter_map(|field| field.ident.as_ref());
            Ok(quote! {
                #[allow(unused_variables)]
                let #name { #(#idents),* } = self;
            })
        },
        Fields::Unit => Ok(TokenStream2::new()),
        Fields::Unnamed(_) => Err(syn::Error::new_spanned(
            name,
            "`ErrorKind` cannot be derived for tuple structs",
        )),
    }
}

/// Generates the `ErrorKind` implementation for a struct.
pub fn expand(input: DeriveInput) -> syn::Result<TokenStream2> {
    let name = &input.ident;
    let Data::Struct(data) = &input.data else {
        return Err(syn::Error::new_spanned(name, "`ErrorKind` can only be derived for structs"));
    };
    let bind = bind_fields(name, &data.fields)?;
    let Tags { message, labels, help } = Tags::from_attrs(&input)?;

    let message = match message {
        Some(expr) => quote! { ::std::string::ToString::to_string(&(#expr)) },
        None => quote! { ::std::string::String::from(stringify!(#name)) },
    };
    let labels = match labels {
        Some(expr) => quote! { #expr },
        None => quote! { ::std::vec::Vec::<::std::string::String>::new() },
    };
    let help = help.map(|expr| quote! { report = report.with_help(#expr); });

    Ok(quote! {
        impl tm_error::ErrorKind for #name {
            fn as_any(&self) -> &dyn ::std::any::Any {
                self
            }

            fn message(&self) -> ::std::string::String {
                #bind
                #message
            }

            fn build_report<'a>(
                &self,
                src_id: &'a str,
                spans: &[::std::ops::Range<usize>],
            ) -> ariadne::Report<(&'a str, ::std::ops::Range<usize>)> {
                #bind
                let start = spans.first().map_or(0, |span| span.start);
                let mut report = ariadne::Report::build(ariadne::ReportKind::Error, src_id, start)
                    .with_message(tm_error::ErrorKind::message(self));

                // labels without a span are dropped
                for (text, span) in ::std::iter::IntoIterator::into_iter(#labels).zip(spans) {
                    let text = ::std::string::ToString::to_string(&text);
                    let label = ariadne::Label::new((src_id, span.clone())).with_color(tm_error::EXPR);
                    report = report.with_label(if text.is_empty() { label } else { label.with_message(text) });
                }

                #help
                report.finish()
            }
        }
    })
}
