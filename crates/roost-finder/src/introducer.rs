//! Finder methods for entities that declare `finders = {...}`.
//!
//! The introducer does not write source files. It describes each method
//! (signature plus body lines) so the code-emission layer can place it into
//! the entity's introduction file.

use std::collections::HashSet;

use roost_types::{capitalize, Diagnostic, EntityDetails, JavaType, Parameter};

use crate::query::QueryHolder;
use crate::token::Token;
use crate::vocabulary::Keyword;
use crate::{DynamicFinderServices, FinderOptions};

const TYPED_QUERY: &str = "javax.persistence.TypedQuery";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FinderMethod {
    pub name: String,
    pub return_type: JavaType,
    pub params: Vec<Parameter>,
    pub is_static: bool,
    /// Statements of the method body, nested lines already indented.
    pub body: Vec<String>,
}

impl FinderMethod {
    /// Java source for the whole method.
    pub fn render(&self) -> String {
        let params: Vec<String> = self
            .params
            .iter()
            .map(|p| format!("{} {}", p.ty.source_name(), p.name))
            .collect();
        let mut out = format!(
            "public {}{} {}({}) {{\n",
            if self.is_static { "static " } else { "" },
            self.return_type.source_name(),
            self.name,
            params.join(", ")
        );
        for line in &self.body {
            out.push_str("    ");
            out.push_str(line);
            out.push('\n');
        }
        out.push('}');
        out
    }
}

/// Methods to add to one entity, plus what went wrong on the way.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Introduction {
    pub methods: Vec<FinderMethod>,
    pub diagnostics: Vec<Diagnostic>,
}

#[derive(Debug, Clone, Default)]
pub struct FinderIntroducer {
    options: FinderOptions,
}

impl FinderIntroducer {
    pub fn new(options: FinderOptions) -> Self {
        Self { options }
    }

    pub fn introduce(&self, entity: &EntityDetails) -> Introduction {
        let mut introduction = Introduction::default();
        let plural = entity.plural();
        let mut seen = HashSet::new();

        for finder in entity.declared_finders() {
            if !seen.insert(finder.clone()) {
                continue;
            }
            let resolved = DynamicFinderServices.query_holder_with_alias(
                &entity.members,
                &finder,
                &plural,
                entity.simple_name(),
                &self.options.alias,
            );
            match resolved {
                Ok(holder) => {
                    let method = MethodBuilder::new(entity, &holder, &self.options.alias);
                    introduction.methods.push(method.finder(&finder));
                    if self.options.count_queries {
                        introduction.methods.push(method.count(&finder));
                    }
                }
                Err(err) => {
                    tracing::debug!(
                        target: "roost.finder",
                        finder = finder.as_str(),
                        code = err.code(),
                        "declared finder skipped"
                    );
                    introduction
                        .diagnostics
                        .push(Diagnostic::error(err.code(), err.to_string()));
                }
            }
        }

        introduction
    }
}

struct MethodBuilder<'a> {
    entity: &'a EntityDetails,
    holder: &'a QueryHolder,
    alias: &'a str,
    params: Vec<Parameter>,
    like_params: HashSet<&'a str>,
}

impl<'a> MethodBuilder<'a> {
    fn new(entity: &'a EntityDetails, holder: &'a QueryHolder, alias: &'a str) -> Self {
        let like_params = holder
            .tokens()
            .windows(2)
            .filter_map(|pair| match (&pair[0], pair[1].keyword()) {
                (Token::Field(field), Some(Keyword::Like | Keyword::Ilike)) => Some(field.name()),
                _ => None,
            })
            .collect();
        Self {
            entity,
            holder,
            alias,
            params: holder.parameters().collect(),
            like_params,
        }
    }

    fn finder(&self, finder: &str) -> FinderMethod {
        let entity_type = self.entity.members.owner().clone();
        let entity_name = self.entity.simple_name();
        let query_type = JavaType::with_args(TYPED_QUERY, vec![entity_type]);

        let mut body = self.prelude();
        body.extend(self.query_lines(&query_type, self.holder.jpql(), entity_name));
        body.push("return q;".to_string());

        FinderMethod {
            name: finder.to_string(),
            return_type: query_type,
            params: self.params.clone(),
            is_static: true,
            body,
        }
    }

    fn count(&self, finder: &str) -> FinderMethod {
        let query_type = JavaType::with_args(TYPED_QUERY, vec![JavaType::long_object()]);

        let mut body = self.prelude();
        body.extend(self.query_lines(&query_type, self.holder.count_jpql(), "Long"));
        body.push("return q.getSingleResult();".to_string());

        FinderMethod {
            name: format!("count{}", capitalize(finder)),
            return_type: JavaType::long_object(),
            params: self.params.clone(),
            is_static: true,
            body,
        }
    }

    /// Argument checks and `LIKE` pattern normalization.
    fn prelude(&self) -> Vec<String> {
        let mut body = Vec::new();
        for param in &self.params {
            let name = &param.name;
            if param.ty.is_primitive() {
                continue;
            }
            let condition = if param.ty.is_string() {
                format!("{name} == null || {name}.length() == 0")
            } else {
                format!("{name} == null")
            };
            body.push(format!(
                "if ({condition}) throw new IllegalArgumentException(\"The {name} argument is required\");"
            ));
        }
        for param in &self.params {
            if !self.like_params.contains(param.name.as_str()) {
                continue;
            }
            let name = &param.name;
            body.push(format!("{name} = {name}.replace('*', '%');"));
            body.push(format!("if ({name}.charAt(0) != '%') {{"));
            body.push(format!("    {name} = \"%\" + {name};"));
            body.push("}".to_string());
            body.push(format!("if ({name}.charAt({name}.length() - 1) != '%') {{"));
            body.push(format!("    {name} = {name} + \"%\";"));
            body.push("}".to_string());
        }
        body
    }

    /// Query construction and parameter binding. Collection parameters are
    /// matched element by element with `MEMBER OF`, so their part of the
    /// query is appended at run time.
    fn query_lines(&self, query_type: &JavaType, jpql: &str, result_class: &str) -> Vec<String> {
        let entity_name = self.entity.simple_name();
        let query_type = query_type.source_name();
        let (collections, scalars): (Vec<&Parameter>, Vec<&Parameter>) = self
            .params
            .iter()
            .partition(|p| p.ty.is_common_collection_type());

        let mut body = vec![format!("EntityManager em = {entity_name}.entityManager();")];
        if collections.is_empty() {
            body.push(format!(
                "{query_type} q = em.createQuery(\"{}\", {result_class}.class);",
                escape_java(jpql)
            ));
        } else {
            body.push(format!(
                "StringBuilder queryBuilder = new StringBuilder(\"{}\");",
                escape_java(jpql)
            ));
            for param in &collections {
                let name = &param.name;
                body.push(format!("int {name}Idx = 0;"));
                body.push(format!(
                    "for ({} {name}Item : {name}) {{",
                    element_type(param)
                ));
                body.push(
                    "    queryBuilder.append(queryBuilder.indexOf(\" WHERE \") < 0 ? \" WHERE \" : \" AND \");"
                        .to_string(),
                );
                body.push(format!(
                    "    queryBuilder.append(\":{name}_item\").append({name}Idx++).append(\" MEMBER OF {}.{name}\");",
                    self.alias
                ));
                body.push("}".to_string());
            }
            body.push(format!(
                "{query_type} q = em.createQuery(queryBuilder.toString(), {result_class}.class);"
            ));
        }

        for param in &scalars {
            body.push(format!("q.setParameter(\"{0}\", {0});", param.name));
        }
        for param in &collections {
            let name = &param.name;
            body.push(format!("{name}Idx = 0;"));
            body.push(format!(
                "for ({} {name}Item : {name}) {{",
                element_type(param)
            ));
            body.push(format!(
                "    q.setParameter(\"{name}_item\" + {name}Idx++, {name}Item);"
            ));
            body.push("}".to_string());
        }
        body
    }
}

fn element_type(param: &Parameter) -> String {
    param
        .ty
        .args()
        .first()
        .map(JavaType::source_name)
        .unwrap_or_else(|| "Object".to_string())
}

fn escape_java(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for ch in text.chars() {
        match ch {
            '\\' => out.push_str("\\\\"),
            '"' => out.push_str("\\\""),
            '\n' => out.push_str("\\n"),
            _ => out.push(ch),
        }
    }
    out
}
