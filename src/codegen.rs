//! Java class generation from record definitions.
//!
//! One [`RecordDefinition`] becomes one top-level class: private fields in
//! source order, a getter/setter pair per field, and, depending on
//! [`GeneratorOptions`], `equals`/`hashCode` and `toString`. The output is a
//! pure function of its inputs so repeated runs are byte-identical.

use crate::ir::{FieldType, Primitive, RecordDefinition};
use crate::naming;
use crate::options::GeneratorOptions;

const INDENT: &str = "    ";
const TO_STRING_DELIMITER: &str = ", ";

pub struct Codegen<'o> {
    package: String,
    options: &'o GeneratorOptions,
    out: String,
}

impl<'o> Codegen<'o> {
    pub fn new(package: &str, options: &'o GeneratorOptions) -> Self {
        Self { package: package.to_string(), options, out: String::new() }
    }

    /// Render `def` as a complete compilation unit.
    pub fn emit(&mut self, def: &RecordDefinition) {
        tracing::debug!(record = %def.name, fields = def.fields.len(), "emitting class");
        self.header(def);

        let mut members = Vec::<String>::new();
        for field in &def.fields {
            let ty = java_type(&field.ty);
            let name = &field.field_name;
            members.push(format!("{INDENT}private {ty} {name};\n"));
            members.push(getter(&ty, name, field.ty.is_boolean()));
            members.push(setter(&ty, name));
        }
        if self.options.emit_equality {
            members.push(equals(def));
            members.push(hash_code(def));
        }
        if self.options.emit_textual_representation {
            members.push(to_string(def));
        }

        self.out.push_str(&format!("public class {} {{\n\n", def.name));
        self.out.push_str(&members.join("\n"));
        self.out.push_str("}\n");
    }

    pub fn into_string(self) -> String { self.out }

    fn header(&mut self, def: &RecordDefinition) {
        if !self.package.is_empty() {
            self.out.push_str(&format!("package {};\n\n", self.package));
        }
        let needs_list = def.has_list_field();
        let needs_objects = self.options.emit_equality;
        if needs_list {
            self.out.push_str("import java.util.List;\n");
        }
        if needs_objects {
            self.out.push_str("import java.util.Objects;\n");
        }
        if needs_list || needs_objects {
            self.out.push('\n');
        }
    }
}

/// Source text for one record.
pub fn emit(def: &RecordDefinition, package: &str, options: &GeneratorOptions) -> String {
    let mut cg = Codegen::new(package, options);
    cg.emit(def);
    cg.into_string()
}

/// Java spelling of a field type.
pub fn java_type(ty: &FieldType) -> String {
    match ty {
        FieldType::Primitive(p) => primitive_type(*p).to_string(),
        FieldType::RecordRef(name) => name.clone(),
        // generics take reference types
        FieldType::ListOf(item) => format!("List<{}>", boxed_type(item)),
    }
}

fn primitive_type(p: Primitive) -> &'static str {
    match p {
        Primitive::Any => "Object",
        Primitive::Bool => "boolean",
        Primitive::Int => "int",
        Primitive::Long => "long",
        Primitive::Float => "float",
        Primitive::Double => "double",
        Primitive::String => "String",
    }
}

fn boxed_type(ty: &FieldType) -> String {
    match ty {
        FieldType::Primitive(Primitive::Bool) => "Boolean".to_string(),
        FieldType::Primitive(Primitive::Int) => "Integer".to_string(),
        FieldType::Primitive(Primitive::Long) => "Long".to_string(),
        FieldType::Primitive(Primitive::Float) => "Float".to_string(),
        FieldType::Primitive(Primitive::Double) => "Double".to_string(),
        other => java_type(other),
    }
}

fn getter(ty: &str, name: &str, is_boolean: bool) -> String {
    let method = naming::getter_name(name, is_boolean);
    format!(
        "{INDENT}public {ty} {method}() {{\n\
         {INDENT}{INDENT}return this.{name};\n\
         {INDENT}}}\n"
    )
}

fn setter(ty: &str, name: &str) -> String {
    let method = naming::setter_name(name);
    format!(
        "{INDENT}public void {method}({ty} {name}) {{\n\
         {INDENT}{INDENT}this.{name} = {name};\n\
         {INDENT}}}\n"
    )
}

fn equals(def: &RecordDefinition) -> String {
    let class = &def.name;
    let mut s = String::new();
    s.push_str(&format!("{INDENT}@Override\n"));
    s.push_str(&format!("{INDENT}public boolean equals(Object o) {{\n"));
    s.push_str(&format!("{INDENT}{INDENT}if (this == o) return true;\n"));
    s.push_str(&format!("{INDENT}{INDENT}if (!(o instanceof {class})) return false;\n"));
    if def.fields.is_empty() {
        s.push_str(&format!("{INDENT}{INDENT}return true;\n"));
    } else {
        s.push_str(&format!("{INDENT}{INDENT}{class} that = ({class}) o;\n"));
        let comparisons = def.fields
            .iter()
            // qualified: fields may be named `o` or `that`
            .map(|f| format!("Objects.equals(this.{0}, that.{0})", f.field_name))
            .collect::<Vec<_>>()
            .join(" && ");
        s.push_str(&format!("{INDENT}{INDENT}return {comparisons};\n"));
    }
    s.push_str(&format!("{INDENT}}}\n"));
    s
}

fn hash_code(def: &RecordDefinition) -> String {
    let body = if def.fields.is_empty() {
        "return 1;".to_string()
    } else {
        let names = def.fields
            .iter()
            .map(|f| f.field_name.as_str())
            .collect::<Vec<_>>()
            .join(", ");
        format!("return Objects.hash({names});")
    };
    format!(
        "{INDENT}@Override\n\
         {INDENT}public int hashCode() {{\n\
         {INDENT}{INDENT}{body}\n\
         {INDENT}}}\n"
    )
}

fn to_string(def: &RecordDefinition) -> String {
    let class = &def.name;
    let mut s = String::new();
    s.push_str(&format!("{INDENT}@Override\n"));
    s.push_str(&format!("{INDENT}public String toString() {{\n"));
    if def.fields.is_empty() {
        s.push_str(&format!("{INDENT}{INDENT}return \"{class}{{}}\";\n"));
    } else {
        let cont = INDENT.repeat(4);
        s.push_str(&format!("{INDENT}{INDENT}return \"{class}{{\" +\n"));
        for (i, f) in def.fields.iter().enumerate() {
            let sep = if i == 0 { "" } else { TO_STRING_DELIMITER };
            let name = &f.field_name;
            s.push_str(&format!("{cont}\"{sep}{name}='\" + {name} + \"'\" +\n"));
        }
        s.push_str(&format!("{cont}\"}}\";\n"));
    }
    s.push_str(&format!("{INDENT}}}\n"));
    s
}

#[cfg(test)]
mod tests {
    #![allow(non_snake_case)]

    use super::*;
    use crate::ir::FieldDefinition;

    fn field(key: &str, ty: FieldType) -> FieldDefinition {
        FieldDefinition {
            source_key: key.to_string(),
            field_name: naming::field_name(key),
            ty,
        }
    }

    fn record(name: &str, fields: Vec<FieldDefinition>) -> RecordDefinition {
        RecordDefinition { name: name.to_string(), path: vec![], fields }
    }

    fn bare() -> GeneratorOptions {
        GeneratorOptions::default()
            .with_equality(false)
            .with_textual_representation(false)
    }

    #[test]
    fn java_type___maps_primitives_and_boxes_list_items() {
        assert_eq!(java_type(&FieldType::Primitive(Primitive::Any)), "Object");
        assert_eq!(java_type(&FieldType::Primitive(Primitive::Int)), "int");
        assert_eq!(java_type(&FieldType::RecordRef("Address".into())), "Address");
        assert_eq!(
            java_type(&FieldType::list_of(FieldType::Primitive(Primitive::Int))),
            "List<Integer>"
        );
        assert_eq!(
            java_type(&FieldType::list_of(FieldType::list_of(FieldType::Primitive(Primitive::Bool)))),
            "List<List<Boolean>>"
        );
    }

    #[test]
    fn emit___bare_class_layout() {
        let def = record("Address", vec![field("city", FieldType::Primitive(Primitive::String))]);
        let code = emit(&def, "base.pojo", &bare());
        let expected = "\
package base.pojo;

public class Address {

    private String city;

    public String getCity() {
        return this.city;
    }

    public void setCity(String city) {
        this.city = city;
    }
}
";
        assert_eq!(code, expected);
    }

    #[test]
    fn emit___boolean_getter_uses_is_prefix() {
        let def = record("Flags", vec![
            field("active", FieldType::Primitive(Primitive::Bool)),
            field("tags", FieldType::list_of(FieldType::Primitive(Primitive::Bool))),
        ]);
        let code = emit(&def, "p", &bare());
        assert!(code.contains("public boolean isActive()"));
        assert!(code.contains("public List<Boolean> getTags()"));
    }

    #[test]
    fn emit___imports_follow_structure() {
        let plain = record("A", vec![field("n", FieldType::Primitive(Primitive::Int))]);
        let listy = record("B", vec![field("xs", FieldType::list_of(FieldType::Primitive(Primitive::Int)))]);

        let code = emit(&plain, "p", &bare());
        assert!(!code.contains("import"));

        let code = emit(&listy, "p", &bare());
        assert!(code.contains("import java.util.List;\n"));
        assert!(!code.contains("import java.util.Objects;"));

        let code = emit(&plain, "p", &bare().with_equality(true));
        assert!(code.contains("import java.util.Objects;\n"));
        assert!(!code.contains("import java.util.List;"));
    }

    #[test]
    fn emit___equality_compares_every_field_in_order() {
        let def = record("User", vec![
            field("name", FieldType::Primitive(Primitive::String)),
            field("age", FieldType::Primitive(Primitive::Int)),
        ]);
        let code = emit(&def, "p", &bare().with_equality(true));
        assert!(code.contains("if (!(o instanceof User)) return false;"));
        assert!(code.contains("User that = (User) o;"));
        assert!(code.contains(
            "return Objects.equals(this.name, that.name) && Objects.equals(this.age, that.age);"
        ));
        assert!(code.contains("return Objects.hash(name, age);"));
    }

    #[test]
    fn emit___equality_is_not_shadowed_by_parameter_or_cast() {
        let def = record("Pair", vec![
            field("o", FieldType::Primitive(Primitive::Int)),
            field("that", FieldType::Primitive(Primitive::String)),
        ]);
        let code = emit(&def, "p", &bare().with_equality(true));
        assert!(code.contains(
            "return Objects.equals(this.o, that.o) && Objects.equals(this.that, that.that);"
        ), "got:\n{code}");
    }

    #[test]
    fn emit___empty_record_has_vacuous_equality_and_constant_hash() {
        let def = record("Empty", vec![]);
        let code = emit(&def, "p", &GeneratorOptions::default());
        assert!(code.contains("        return true;\n    }"));
        assert!(!code.contains("Empty that"));
        assert!(code.contains("return 1;"));
        assert!(code.contains("return \"Empty{}\";"));
    }

    #[test]
    fn emit___to_string_lists_fields_with_delimiter() {
        let def = record("User", vec![
            field("name", FieldType::Primitive(Primitive::String)),
            field("age", FieldType::Primitive(Primitive::Int)),
        ]);
        let code = emit(&def, "p", &bare().with_textual_representation(true));
        let expected = "\
    @Override
    public String toString() {
        return \"User{\" +
                \"name='\" + name + \"'\" +
                \", age='\" + age + \"'\" +
                \"}\";
    }
";
        assert!(code.contains(expected), "got:\n{code}");
    }

    #[test]
    fn emit___empty_package_omits_declaration() {
        let def = record("A", vec![]);
        let code = emit(&def, "", &bare());
        assert!(code.starts_with("public class A {"));
    }
}
