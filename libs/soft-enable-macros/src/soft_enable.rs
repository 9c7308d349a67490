use heck::ToUpperCamelCase;
use proc_macro_error2::abort;
use proc_macro2::{Span, TokenStream};
use quote::quote;
use syn::{Data, DeriveInput, Fields, spanned::Spanned};

const DEFAULT_COLUMN: &str = "enabled";

/// Configuration parsed from `#[soft_enable(...)]` attributes
#[derive(Default)]
struct EnableConfig {
    column: Option<(String, Span)>,
}

impl EnableConfig {
    fn column_name(&self) -> &str {
        self.column
            .as_ref()
            .map_or(DEFAULT_COLUMN, |(name, _)| name.as_str())
    }
}

#[allow(clippy::needless_pass_by_value)] // DeriveInput is consumed by proc-macro pattern
pub fn expand_derive_soft_enable(input: DeriveInput) -> TokenStream {
    let Data::Struct(data) = &input.data else {
        abort!(
            input.span(),
            "#[derive(SoftEnable)] can only be applied to structs"
        );
    };

    let config = parse_enable_attrs(&input);
    let column = config.column_name();

    if !has_named_field(&data.fields, column) {
        let span = config.column.as_ref().map_or(input.ident.span(), |c| c.1);
        abort!(
            span,
            "soft_enable: no field named `{}` on this model; add it or set `#[soft_enable(column = \"...\")]`",
            column
        );
    }

    let entity_ident = syn::Ident::new("Entity", input.ident.span());
    let col_ident = syn::Ident::new(&column_variant(column), input.ident.span());

    quote! {
        impl ::soft_enable::EnableableEntity for #entity_ident {
            fn enabled_col() -> Self::Column {
                Self::Column::#col_ident
            }
        }
    }
}

fn has_named_field(fields: &Fields, name: &str) -> bool {
    fields
        .iter()
        .filter_map(|f| f.ident.as_ref())
        .any(|ident| ident == name || ident.to_string().trim_start_matches("r#") == name)
}

/// Parse all `#[soft_enable(...)]` attributes with duplicate detection
fn parse_enable_attrs(input: &DeriveInput) -> EnableConfig {
    let mut config = EnableConfig::default();

    for attr in &input.attrs {
        if !attr.path().is_ident("soft_enable") {
            continue;
        }

        let result = attr.parse_nested_meta(|meta| {
            let span = meta.path.span();

            if !meta.path.is_ident("column") {
                let key = meta
                    .path
                    .get_ident()
                    .map(ToString::to_string)
                    .unwrap_or_default();
                abort!(
                    span,
                    "Unknown attribute '{}'. Valid attributes: column",
                    key
                );
            }

            let value: String = match meta.value() {
                Ok(v) => match v.parse::<syn::LitStr>() {
                    Ok(lit) => lit.value(),
                    Err(_) => abort!(span, "Expected string literal"),
                },
                Err(_) => abort!(span, "Expected '=' followed by a string value"),
            };

            if value.is_empty() {
                abort!(span, "soft_enable: `column` must not be empty");
            }
            if config.column.is_some() {
                abort!(span, "duplicate attribute 'column'");
            }
            config.column = Some((value, span));
            Ok(())
        });

        if let Err(err) = result {
            abort!(err.span(), "{}", err);
        }
    }

    config
}

/// `SeaORM` names `Column` variants after the `UpperCamelCase` field name.
fn column_variant(s: &str) -> String {
    s.to_upper_camel_case()
}

#[cfg(test)]
#[cfg_attr(coverage_nightly, coverage(off))]
mod tests {
    use super::*;
    use syn::parse_quote;

    #[test]
    fn test_column_variant() {
        assert_eq!(column_variant("enabled"), "Enabled");
        assert_eq!(column_variant("is_active"), "IsActive");
        assert_eq!(column_variant("visible_flag_v2"), "VisibleFlagV2");
    }

    #[test]
    fn test_default_column_when_no_attribute() {
        let input: DeriveInput = parse_quote! {
            struct Model {
                id: i32,
                enabled: Option<bool>,
            }
        };
        let config = parse_enable_attrs(&input);
        assert_eq!(config.column_name(), "enabled");
    }

    #[test]
    fn test_column_override() {
        let input: DeriveInput = parse_quote! {
            #[soft_enable(column = "is_active")]
            struct Model {
                id: i32,
                is_active: bool,
            }
        };
        let config = parse_enable_attrs(&input);
        assert_eq!(config.column_name(), "is_active");
    }

    #[test]
    fn test_unrelated_attributes_are_ignored() {
        let input: DeriveInput = parse_quote! {
            #[sea_orm(table_name = "users")]
            #[derive(Debug)]
            struct Model {
                enabled: bool,
            }
        };
        let config = parse_enable_attrs(&input);
        assert!(config.column.is_none());
    }

    #[test]
    fn test_has_named_field() {
        let input: DeriveInput = parse_quote! {
            struct Model {
                id: i32,
                r#enabled: bool,
            }
        };
        let Data::Struct(data) = &input.data else {
            panic!("expected struct");
        };
        assert!(has_named_field(&data.fields, "id"));
        assert!(has_named_field(&data.fields, "enabled"));
        assert!(!has_named_field(&data.fields, "is_active"));
    }

    #[test]
    fn test_expansion_targets_entity_column() {
        let input: DeriveInput = parse_quote! {
            #[soft_enable(column = "is_active")]
            struct Model {
                is_active: bool,
            }
        };
        let tokens = expand_derive_soft_enable(input).to_string();
        assert!(tokens.contains("EnableableEntity for Entity"));
        assert!(tokens.contains("IsActive"));
    }
}
