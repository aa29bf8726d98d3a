use quote::quote;
use syn::{parse_quote, Attribute, Expr, Lit, LitStr, Meta, MetaNameValue};
use synstructure::decl_derive;

/// Collects the doc comment lines attached to a field.
fn doc_lines(attrs: &[Attribute]) -> Vec<String> {
    let mut lines = vec![];
    for attr in attrs.iter() {
        if let Ok(Meta::NameValue(MetaNameValue {
            ident,
            lit: Lit::Str(doc_str),
            ..
        })) = attr.parse_meta()
        {
            if ident != "doc" {
                continue;
            }
            lines.push(doc_str.value().trim().to_owned());
        }
    }
    lines
}

/// Derives a default instance and a help text from the documentation.
///
/// Each field's default is taken from a `(Default: <expr>)` marker in its doc comment. Fields
/// without a marker use `Default::default()`.
fn derive_doc_default(s: synstructure::Structure) -> proc_macro2::TokenStream {
    let variant = match s.variants() {
        [variant] => variant,
        _ => panic!("DocDefault requires a struct"),
    };

    let default_re = regex::Regex::new(r"\(Default: (.*)\)").unwrap();

    let body = variant.construct(|field, _| {
        let mut default_value: Expr = parse_quote!(Default::default());
        for line in doc_lines(&field.attrs) {
            if let Some(default_str) = default_re.captures(&line) {
                let default_str = default_str.get(1).unwrap().as_str();
                let default_str = LitStr::new(default_str, proc_macro2::Span::call_site());
                default_value = default_str
                    .parse()
                    .expect("error parsing default expression");
            }
        }
        default_value
    });

    let mut help = String::new();
    for binding in variant.bindings() {
        let field = binding.ast();
        let name = match &field.ident {
            Some(ident) => ident.to_string(),
            None => continue,
        };
        help.push_str(&name);
        help.push_str(":\n");
        for line in doc_lines(&field.attrs) {
            if line.is_empty() {
                continue;
            }
            help.push_str("    ");
            help.push_str(&line);
            help.push('\n');
        }
    }

    let default_impl = s.gen_impl(quote! {
        gen impl Default for @Self {
            fn default() -> Self {
                #body
            }
        }
    });

    let name = &s.ast().ident;
    let (impl_generics, ty_generics, where_clause) = s.ast().generics.split_for_impl();

    quote! {
        #default_impl

        impl #impl_generics #name #ty_generics #where_clause {
            /// Lists all fields together with their documentation.
            pub fn help() -> &'static str {
                #help
            }
        }
    }
}

decl_derive!([DocDefault] => derive_doc_default);
