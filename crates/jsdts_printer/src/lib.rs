//! jsdts_printer: Type AST to text output.
//!
//! Renders resolved type nodes as TypeScript type syntax, the form in which
//! a declaration emitter writes them into `.d.ts` output.

use jsdts_ast::node::*;
use jsdts_ast::types::EmitFlags;
use jsdts_core::intern::{InternedString, StringInterner};

/// Options for the printer.
pub struct PrinterOptions {
    /// Indentation string for multi-line type literals.
    pub indent_str: String,
    /// Newline string.
    pub new_line: String,
}

impl Default for PrinterOptions {
    fn default() -> Self {
        Self {
            indent_str: "    ".to_string(),
            new_line: "\n".to_string(),
        }
    }
}

/// The printer converts type nodes to text.
pub struct Printer<'i> {
    output: String,
    indent_level: u32,
    options: PrinterOptions,
    interner: &'i StringInterner,
}

impl<'i> Printer<'i> {
    pub fn new(interner: &'i StringInterner) -> Self {
        Self::with_options(interner, PrinterOptions::default())
    }

    pub fn with_options(interner: &'i StringInterner, options: PrinterOptions) -> Self {
        Self {
            output: String::with_capacity(128),
            indent_level: 0,
            options,
            interner,
        }
    }

    fn resolve(&self, s: InternedString) -> &'i str {
        self.interner.resolve(s)
    }

    /// Print a type node to a string.
    pub fn print_type(&mut self, ty: &TypeNode<'_>) -> String {
        self.output.clear();
        self.indent_level = 0;
        self.print_type_node(ty);
        std::mem::take(&mut self.output)
    }

    /// Print `type name = ty;`.
    pub fn print_type_alias(&mut self, name: &str, ty: &TypeNode<'_>) -> String {
        self.output.clear();
        self.indent_level = 0;
        self.write("type ");
        self.write(name);
        self.write(" = ");
        self.print_type_node(ty);
        self.write(";");
        std::mem::take(&mut self.output)
    }

    // ========================================================================
    // Type printing
    // ========================================================================

    fn print_type_node(&mut self, ty: &TypeNode<'_>) {
        match ty {
            TypeNode::KeywordType(n) => self.write(n.data.kind.keyword_text().unwrap_or("unknown")),
            TypeNode::ThisType(_) => self.write("this"),
            TypeNode::TypeReference(n) => {
                self.print_entity_name(&n.type_name);
                self.print_type_arguments(n.type_arguments);
            }
            TypeNode::ArrayType(n) => {
                self.print_type_node(n.element_type);
                self.write("[]");
            }
            TypeNode::TupleType(n) => {
                self.write("[");
                for (i, elem) in n.elements.iter().enumerate() {
                    if i > 0 { self.write(", "); }
                    self.print_type_node(elem);
                }
                self.write("]");
            }
            TypeNode::UnionType(n) => {
                for (i, t) in n.types.iter().enumerate() {
                    if i > 0 { self.write(" | "); }
                    self.print_type_node(t);
                }
            }
            TypeNode::FunctionType(n) => {
                self.write("(");
                self.print_parameters(n.parameters);
                self.write(") => ");
                match n.return_type {
                    Some(ret) => self.print_type_node(ret),
                    None => self.write("void"),
                }
            }
            TypeNode::TypeLiteral(n) => self.print_type_literal(n),
            TypeNode::ParenthesizedType(n) => {
                self.write("(");
                self.print_type_node(n.type_node);
                self.write(")");
            }
            TypeNode::LiteralType(n) => self.print_string_literal(&n.literal),
            TypeNode::TypeQuery(n) => {
                self.write("typeof ");
                self.print_entity_name(&n.expr_name);
            }
            TypeNode::ImportType(n) => {
                self.write("import(");
                self.print_type_node(n.argument);
                self.write(")");
                if let Some(ref qualifier) = n.qualifier {
                    self.write(".");
                    self.print_entity_name(qualifier);
                }
                self.print_type_arguments(n.type_arguments);
            }
        }
    }

    fn print_type_literal(&mut self, node: &TypeLiteralNode<'_>) {
        if node.members.is_empty() {
            self.write("{}");
            return;
        }
        if node.data.emit_flags.contains(EmitFlags::SINGLE_LINE) {
            self.write("{ ");
            for (i, member) in node.members.iter().enumerate() {
                if i > 0 { self.write(" "); }
                self.print_type_element(member);
            }
            self.write(" }");
            return;
        }
        self.write("{");
        self.increase_indent();
        for member in node.members {
            self.write_newline();
            self.write_indent();
            self.print_type_element(member);
        }
        self.decrease_indent();
        self.write_newline();
        self.write_indent();
        self.write("}");
    }

    fn print_type_element(&mut self, elem: &TypeElement<'_>) {
        match elem {
            TypeElement::PropertySignature(p) => {
                self.print_property_name(&p.name);
                if p.question_token.is_some() { self.write("?"); }
                if let Some(ty) = p.type_annotation {
                    self.write(": ");
                    self.print_type_node(ty);
                }
                self.write(";");
            }
            TypeElement::IndexSignature(idx) => {
                self.write("[");
                self.print_parameters(idx.parameters);
                self.write("]");
                if let Some(ty) = idx.type_annotation {
                    self.write(": ");
                    self.print_type_node(ty);
                }
                self.write(";");
            }
        }
    }

    fn print_type_arguments(&mut self, type_args: Option<&[TypeNode<'_>]>) {
        if let Some(type_args) = type_args {
            self.write("<");
            for (i, arg) in type_args.iter().enumerate() {
                if i > 0 { self.write(", "); }
                self.print_type_node(arg);
            }
            self.write(">");
        }
    }

    // ========================================================================
    // Helper printing functions
    // ========================================================================

    fn print_identifier(&mut self, id: &Identifier) {
        let text = self.resolve(id.text);
        self.write(text);
    }

    fn print_entity_name(&mut self, name: &EntityName<'_>) {
        match name {
            EntityName::Identifier(id) => self.print_identifier(id),
            EntityName::QualifiedName(q) => {
                self.print_entity_name(&q.left);
                self.write(".");
                self.print_identifier(&q.right);
            }
        }
    }

    fn print_property_name(&mut self, name: &PropertyName) {
        match name {
            PropertyName::Identifier(id) => self.print_identifier(id),
            PropertyName::StringLiteral(lit) => self.print_string_literal(lit),
        }
    }

    fn print_string_literal(&mut self, lit: &StringLiteral) {
        let quote = if lit.is_single_quote { '\'' } else { '"' };
        let text = self.resolve(lit.text);
        self.output.push(quote);
        for ch in text.chars() {
            if ch == quote || ch == '\\' {
                self.output.push('\\');
            }
            self.output.push(ch);
        }
        self.output.push(quote);
    }

    fn print_parameters(&mut self, params: &[ParameterDeclaration<'_>]) {
        for (i, param) in params.iter().enumerate() {
            if i > 0 { self.write(", "); }
            if param.dot_dot_dot_token.is_some() { self.write("..."); }
            self.print_identifier(&param.name);
            if param.question_token.is_some() { self.write("?"); }
            if let Some(ty) = param.type_annotation {
                self.write(": ");
                self.print_type_node(ty);
            }
        }
    }

    // ========================================================================
    // Core write helpers
    // ========================================================================

    fn write(&mut self, s: &str) {
        self.output.push_str(s);
    }

    fn write_newline(&mut self) {
        self.output.push_str(&self.options.new_line);
    }

    fn write_indent(&mut self) {
        for _ in 0..self.indent_level {
            self.output.push_str(&self.options.indent_str);
        }
    }

    fn increase_indent(&mut self) {
        self.indent_level += 1;
    }

    fn decrease_indent(&mut self) {
        if self.indent_level > 0 {
            self.indent_level -= 1;
        }
    }
}

/// Print a type node with default options.
pub fn print_type(ty: &TypeNode<'_>, interner: &StringInterner) -> String {
    Printer::new(interner).print_type(ty)
}
