//! Per-language regular expressions.
//!
//! Import rules capture the raw specifier in a `spec` group and declaration
//! rules capture the declared name in a `name` group.

use repograph_graph::FunctionKind;

use super::normalize::ImportStyle;
use crate::language::Language;

pub(super) struct RuleSet {
    pub imports: &'static [(&'static str, ImportStyle)],
    pub declarations: &'static [(&'static str, FunctionKind)],
    /// Names that only ever match as false positives.
    pub reserved: &'static [&'static str],
}

const C_RESERVED: &[&str] = &[
    "if", "else", "for", "while", "do", "switch", "case", "return", "sizeof", "catch", "new",
    "delete", "throw",
];

const JVM_RESERVED: &[&str] = &[
    "if", "else", "for", "while", "do", "switch", "catch", "return", "new", "throw", "synchronized",
];

pub(super) fn rule_set(language: Language) -> Option<RuleSet> {
    use FunctionKind::{Class, Function, Method};
    use ImportStyle::*;

    let rules = match language {
        Language::JavaScript | Language::TypeScript => return None,
        Language::Python => RuleSet {
            imports: &[
                (r"(?m)^[ \t]*from[ \t]+(?P<spec>\.*[\w.]*)[ \t]+import\b", PythonFrom),
                (
                    r"(?m)^[ \t]*import[ \t]+(?P<spec>[\w.]+(?:[ \t]+as[ \t]+\w+)?(?:[ \t]*,[ \t]*[\w.]+(?:[ \t]+as[ \t]+\w+)?)*)",
                    PythonImport,
                ),
            ],
            declarations: &[
                (r"(?m)^[ \t]*(?:async[ \t]+)?def[ \t]+(?P<name>\w+)", Function),
                (r"(?m)^[ \t]*class[ \t]+(?P<name>\w+)", Class),
            ],
            reserved: &[],
        },
        Language::Rust => RuleSet {
            imports: &[
                (
                    r"(?m)^[ \t]*(?:pub(?:\([^)]*\))?[ \t]+)?mod[ \t]+(?P<spec>\w+)[ \t]*;",
                    RustMod,
                ),
                (
                    r"(?m)^[ \t]*(?:pub(?:\([^)]*\))?[ \t]+)?use[ \t]+(?P<spec>[\w:]+)",
                    RustUse,
                ),
            ],
            declarations: &[
                (
                    r#"(?m)^[ \t]*(?:pub(?:\([^)]*\))?[ \t]+)?(?:const[ \t]+)?(?:async[ \t]+)?(?:unsafe[ \t]+)?(?:extern[ \t]+"[^"]*"[ \t]+)?fn[ \t]+(?P<name>\w+)"#,
                    Function,
                ),
                (
                    r"(?m)^[ \t]*(?:pub(?:\([^)]*\))?[ \t]+)?(?:struct|enum|trait|union)[ \t]+(?P<name>\w+)",
                    Class,
                ),
            ],
            reserved: &[],
        },
        Language::Go => RuleSet {
            imports: &[
                (r#"(?m)^[ \t]*import[ \t]+(?:[\w.]+[ \t]+)?"(?P<spec>[^"]+)""#, Path),
                (r"(?s)\bimport[ \t]*\((?P<spec>[^)]*)\)", GoBlock),
            ],
            declarations: &[
                (r"(?m)^func[ \t]+(?:\([^)]*\)[ \t]*)?(?P<name>\w+)", Function),
                (r"(?m)^type[ \t]+(?P<name>\w+)[ \t]+(?:struct|interface)\b", Class),
            ],
            reserved: &[],
        },
        Language::Java => RuleSet {
            imports: &[(
                r"(?m)^[ \t]*import[ \t]+(?:static[ \t]+)?(?P<spec>[\w.]+(?:\.\*)?)[ \t]*;",
                Dotted,
            )],
            declarations: &[
                (
                    r"(?m)^[ \t]*(?:(?:public|private|protected|static|final|abstract|sealed)[ \t]+)*(?:class|interface|enum|record)[ \t]+(?P<name>\w+)",
                    Class,
                ),
                (
                    r"(?m)^[ \t]*(?:(?:public|private|protected|static|final|abstract|synchronized|native|default)[ \t]+)+[\w<>\[\], ]+?[ \t]+(?P<name>\w+)[ \t]*\([^)]*\)[ \t]*(?:throws[ \t]+[\w., ]+)?\{",
                    Method,
                ),
            ],
            reserved: JVM_RESERVED,
        },
        Language::Kotlin => RuleSet {
            imports: &[(r"(?m)^[ \t]*import[ \t]+(?P<spec>[\w.]+(?:\.\*)?)", Dotted)],
            declarations: &[
                (
                    r"(?m)^[ \t]*(?:(?:public|private|internal|protected|inline|suspend|override|open|abstract|operator|infix|tailrec)[ \t]+)*fun[ \t]+(?:<[^>]*>[ \t]*)?(?:[\w.]+\.)?(?P<name>\w+)[ \t]*\(",
                    Function,
                ),
                (
                    r"(?m)^[ \t]*(?:(?:public|private|internal|protected|open|abstract|sealed|data|enum|inner|annotation|value)[ \t]+)*(?:class|interface|object)[ \t]+(?P<name>\w+)",
                    Class,
                ),
            ],
            reserved: JVM_RESERVED,
        },
        Language::Scala => RuleSet {
            imports: &[(r"(?m)^[ \t]*import[ \t]+(?P<spec>[\w.]+)", Dotted)],
            declarations: &[
                (
                    r"(?m)^[ \t]*(?:(?:private|protected|override|final|implicit|inline)[ \t]+)*def[ \t]+(?P<name>\w+)",
                    Function,
                ),
                (
                    r"(?m)^[ \t]*(?:(?:case|abstract|final|sealed|private|protected|implicit)[ \t]+)*(?:class|object|trait|enum)[ \t]+(?P<name>\w+)",
                    Class,
                ),
            ],
            reserved: &[],
        },
        Language::C => RuleSet {
            imports: &[(
                r#"(?m)^[ \t]*#[ \t]*include[ \t]*(?P<spec>"[^"]+"|<[^>]+>)"#,
                CInclude,
            )],
            declarations: &[
                (
                    r"(?m)^[A-Za-z_][\w \t\*]*?\b(?P<name>[A-Za-z_]\w*)[ \t]*\([^;{}]*\)[ \t\r\n]*\{",
                    Function,
                ),
                (
                    r"(?m)^[ \t]*(?:typedef[ \t]+)?(?:struct|union|enum)[ \t]+(?P<name>\w+)[ \t\r\n]*\{",
                    Class,
                ),
            ],
            reserved: C_RESERVED,
        },
        Language::Cpp => RuleSet {
            imports: &[(
                r#"(?m)^[ \t]*#[ \t]*include[ \t]*(?P<spec>"[^"]+"|<[^>]+>)"#,
                CInclude,
            )],
            declarations: &[
                (
                    r"(?m)^[A-Za-z_][\w \t\*&:<>,]*?\b(?P<name>[A-Za-z_][\w:~]*)[ \t]*\([^;{}]*\)[ \t]*(?:const[ \t]*)?(?:noexcept[ \t]*)?(?:override[ \t]*)?[\r\n]*\{",
                    Function,
                ),
                (
                    r"(?m)^[ \t]*(?:template[ \t]*<[^>]*>[ \t\r\n]*)?(?:class|struct)[ \t]+(?P<name>\w+)[^;{]*\{",
                    Class,
                ),
            ],
            reserved: C_RESERVED,
        },
        Language::CSharp => RuleSet {
            imports: &[(
                r"(?m)^[ \t]*using[ \t]+(?:static[ \t]+)?(?P<spec>[\w.]+)[ \t]*;",
                Dotted,
            )],
            declarations: &[
                (
                    r"(?m)^[ \t]*(?:(?:public|private|protected|internal|static|sealed|abstract|partial|readonly)[ \t]+)*(?:class|interface|struct|record|enum)[ \t]+(?P<name>\w+)",
                    Class,
                ),
                (
                    r"(?m)^[ \t]*(?:(?:public|private|protected|internal|static|virtual|override|async|abstract|sealed|extern)[ \t]+)+[\w<>\[\],? ]+?[ \t]+(?P<name>\w+)[ \t]*\([^)]*\)",
                    Method,
                ),
            ],
            reserved: JVM_RESERVED,
        },
        Language::Ruby => RuleSet {
            imports: &[
                (r#"(?m)^[ \t]*require_relative[ \t(]+['"](?P<spec>[^'"]+)['"]"#, RelativePath),
                (r#"(?m)^[ \t]*require[ \t(]+['"](?P<spec>[^'"]+)['"]"#, Path),
            ],
            declarations: &[
                (r"(?m)^[ \t]*def[ \t]+(?:self\.)?(?P<name>[\w?!=]+)", Function),
                (r"(?m)^[ \t]*(?:class|module)[ \t]+(?P<name>[\w:]+)", Class),
            ],
            reserved: &[],
        },
        Language::Php => RuleSet {
            imports: &[
                (
                    r#"(?m)^[ \t]*(?:require|require_once|include|include_once)[ \t]*\(?[ \t]*['"](?P<spec>[^'"]+)['"]"#,
                    RelativePath,
                ),
                (r"(?m)^[ \t]*use[ \t]+(?P<spec>[\w\\]+)", Namespaced),
            ],
            declarations: &[
                (
                    r"(?m)^[ \t]*(?:(?:public|private|protected|static|final|abstract)[ \t]+)*function[ \t]+(?P<name>\w+)",
                    Function,
                ),
                (
                    r"(?m)^[ \t]*(?:(?:abstract|final|readonly)[ \t]+)*(?:class|interface|trait|enum)[ \t]+(?P<name>\w+)",
                    Class,
                ),
            ],
            reserved: &[],
        },
        Language::Swift => RuleSet {
            imports: &[(
                r"(?m)^[ \t]*import[ \t]+(?:(?:class|struct|func|enum|protocol|typealias)[ \t]+)?(?P<spec>[\w.]+)",
                Path,
            )],
            declarations: &[
                (
                    r"(?m)^[ \t]*(?:(?:public|private|internal|fileprivate|open|static|final|override|mutating|@\w+)[ \t]+)*func[ \t]+(?P<name>\w+)",
                    Function,
                ),
                (
                    r"(?m)^[ \t]*(?:(?:public|private|internal|fileprivate|open|final)[ \t]+)*(?:class|struct|enum|protocol|extension|actor)[ \t]+(?P<name>\w+)",
                    Class,
                ),
            ],
            reserved: &[],
        },
        Language::Dart => RuleSet {
            imports: &[(
                r#"(?m)^[ \t]*(?:import|export|part)[ \t]+['"](?P<spec>[^'"]+)['"]"#,
                DartUri,
            )],
            declarations: &[
                (
                    r"(?m)^[ \t]*(?:abstract[ \t]+)?(?:class|mixin|enum|extension)[ \t]+(?P<name>\w+)",
                    Class,
                ),
                (
                    r"(?m)^[ \t]*(?:static[ \t]+)?[\w<>?]+[ \t]+(?P<name>\w+)[ \t]*\([^)]*\)[ \t]*(?:async[ \t]*)?\{",
                    Function,
                ),
            ],
            reserved: &["if", "for", "while", "switch", "catch", "return", "else"],
        },
        Language::Shell => RuleSet {
            imports: &[(
                r#"(?m)^[ \t]*(?:source|\.)[ \t]+['"]?(?P<spec>[^'"\s;]+)"#,
                RelativePath,
            )],
            declarations: &[
                (r"(?m)^[ \t]*function[ \t]+(?P<name>[\w-]+)", Function),
                (r"(?m)^[ \t]*(?P<name>[\w-]+)[ \t]*\(\)[ \t]*\{", Function),
            ],
            reserved: &[],
        },
        Language::R => RuleSet {
            imports: &[
                (r#"(?m)^[ \t]*source\([ \t]*['"](?P<spec>[^'"]+)['"]"#, RelativePath),
                (r#"(?m)^[ \t]*(?:library|require)\([ \t]*['"]?(?P<spec>[\w.]+)"#, Path),
            ],
            declarations: &[(
                r"(?m)^[ \t]*(?P<name>[\w.]+)[ \t]*(?:<-|=)[ \t]*function[ \t]*\(",
                Function,
            )],
            reserved: &[],
        },
        Language::Julia => RuleSet {
            imports: &[
                (r#"(?m)^[ \t]*include\([ \t]*"(?P<spec>[^"]+)""#, RelativePath),
                (r"(?m)^[ \t]*(?:using|import)[ \t]+(?P<spec>[\w.]+)", Path),
            ],
            declarations: &[
                (r"(?m)^[ \t]*function[ \t]+(?P<name>[\w.!]+)", Function),
                (r"(?m)^[ \t]*(?:mutable[ \t]+)?struct[ \t]+(?P<name>\w+)", Class),
                (r"(?m)^[ \t]*(?:abstract[ \t]+type|module)[ \t]+(?P<name>\w+)", Class),
            ],
            reserved: &[],
        },
        Language::Lua => RuleSet {
            imports: &[(r#"\brequire[ \t]*\(?[ \t]*['"](?P<spec>[^'"]+)['"]"#, Dotted)],
            declarations: &[
                (r"(?m)^[ \t]*(?:local[ \t]+)?function[ \t]+(?P<name>[\w.:]+)", Function),
                (
                    r"(?m)^[ \t]*(?:local[ \t]+)?(?P<name>[\w.]+)[ \t]*=[ \t]*function\b",
                    Function,
                ),
            ],
            reserved: &[],
        },
        Language::Haskell => RuleSet {
            imports: &[(
                r"(?m)^[ \t]*import[ \t]+(?:qualified[ \t]+)?(?P<spec>[A-Z][\w.]*)",
                Dotted,
            )],
            declarations: &[
                (r"(?m)^(?P<name>[a-z_][\w']*)[ \t]*::", Function),
                (
                    r"(?m)^[ \t]*(?:data|newtype|class|type)[ \t]+(?P<name>[A-Z]\w*)",
                    Class,
                ),
            ],
            reserved: &["module", "import", "where", "let", "in"],
        },
        Language::OCaml => RuleSet {
            imports: &[(r"(?m)^[ \t]*open[ \t]+(?P<spec>[A-Z]\w*)", OCaml)],
            declarations: &[
                (
                    r"(?m)^[ \t]*let[ \t]+(?:rec[ \t]+)?(?P<name>[a-z_][\w']*)[ \t]+[a-z_(~?]",
                    Function,
                ),
                (r"(?m)^[ \t]*(?:type|module)[ \t]+(?P<name>\w+)", Class),
            ],
            reserved: &["_", "in", "rec", "open"],
        },
        Language::Erlang => RuleSet {
            imports: &[
                (r#"(?m)^[ \t]*-include(?:_lib)?\([ \t]*"(?P<spec>[^"]+)""#, RelativePath),
                (r"(?m)^[ \t]*-import\([ \t]*(?P<spec>\w+)", RelativePath),
            ],
            declarations: &[(
                r"(?m)^(?P<name>[a-z]\w*)[ \t]*\([^)]*\)[ \t]*(?:when[ \t][^-]*)?->",
                Function,
            )],
            reserved: &[],
        },
        Language::Elixir => RuleSet {
            imports: &[(
                r"(?m)^[ \t]*(?:alias|import|require|use)[ \t]+(?P<spec>[A-Z][\w.]*)",
                Elixir,
            )],
            declarations: &[
                (r"(?m)^[ \t]*def(?:p|macro|macrop)?[ \t]+(?P<name>[\w?!]+)", Function),
                (r"(?m)^[ \t]*defmodule[ \t]+(?P<name>[\w.]+)", Class),
            ],
            reserved: &[],
        },
        Language::Clojure => RuleSet {
            imports: &[
                (r"\(:require[ \t\r\n]+\[?(?P<spec>[\w.\-]+)", Clojure),
                (r"(?m)^[ \t]*\[(?P<spec>[\w.\-]+)[ \t]+:(?:as|refer)\b", Clojure),
            ],
            declarations: &[
                (r"(?m)^[ \t]*\(defn-?[ \t]+(?P<name>[\w\-?!*<>]+)", Function),
                (
                    r"(?m)^[ \t]*\((?:defrecord|deftype|defprotocol)[ \t]+(?P<name>[\w\-]+)",
                    Class,
                ),
            ],
            reserved: &[],
        },
        Language::Perl => RuleSet {
            imports: &[(r"(?m)^[ \t]*(?:use|require)[ \t]+(?P<spec>[A-Z][\w:]*)", Namespaced)],
            declarations: &[
                (r"(?m)^[ \t]*sub[ \t]+(?P<name>\w+)", Function),
                (r"(?m)^[ \t]*package[ \t]+(?P<name>[\w:]+)", Class),
            ],
            reserved: &[],
        },
        Language::Sql => RuleSet {
            imports: &[(r"(?m)^[ \t]*\\ir?[ \t]+(?P<spec>\S+)", RelativePath)],
            declarations: &[
                (
                    r#"(?im)^[ \t]*create[ \t]+(?:or[ \t]+replace[ \t]+)?(?:function|procedure)[ \t]+(?:"?\w+"?\.)?"?(?P<name>\w+)"#,
                    Function,
                ),
                (
                    r#"(?im)^[ \t]*create[ \t]+(?:table|view)[ \t]+(?:if[ \t]+not[ \t]+exists[ \t]+)?(?:"?\w+"?\.)?"?(?P<name>\w+)"#,
                    Class,
                ),
            ],
            reserved: &[],
        },
        Language::Zig => RuleSet {
            imports: &[(r#"@import\([ \t]*"(?P<spec>[^"]+)"[ \t]*\)"#, Zig)],
            declarations: &[
                (
                    r"(?m)^[ \t]*(?:pub[ \t]+)?(?:export[ \t]+)?(?:inline[ \t]+)?fn[ \t]+(?P<name>\w+)",
                    Function,
                ),
                (
                    r"(?m)^[ \t]*(?:pub[ \t]+)?const[ \t]+(?P<name>\w+)[ \t]*=[ \t]*(?:extern[ \t]+|packed[ \t]+)?(?:struct|enum|union)\b",
                    Class,
                ),
            ],
            reserved: &[],
        },
        Language::Nim => RuleSet {
            imports: &[
                (r"(?m)^[ \t]*(?:import|include)[ \t]+(?P<spec>[\w/., \t]+)", NimList),
                (r"(?m)^[ \t]*from[ \t]+(?P<spec>[\w/.]+)[ \t]+import\b", RelativePath),
            ],
            declarations: &[
                (
                    r"(?m)^[ \t]*(?:proc|func|method|iterator|template|macro)[ \t]+(?P<name>\w+)",
                    Function,
                ),
                (
                    r"(?m)^[ \t]*(?P<name>[A-Z]\w*)\*?[ \t]*=[ \t]*(?:ref[ \t]+|ptr[ \t]+)?object\b",
                    Class,
                ),
            ],
            reserved: &[],
        },
        Language::V => RuleSet {
            imports: &[(r"(?m)^[ \t]*import[ \t]+(?P<spec>[\w.]+)", Dotted)],
            declarations: &[
                (
                    r"(?m)^[ \t]*(?:pub[ \t]+)?fn[ \t]+(?:\([^)]*\)[ \t]*)?(?P<name>\w+)",
                    Function,
                ),
                (
                    r"(?m)^[ \t]*(?:pub[ \t]+)?(?:struct|interface|enum)[ \t]+(?P<name>\w+)",
                    Class,
                ),
            ],
            reserved: &[],
        },
        Language::Solidity => RuleSet {
            imports: &[(
                r#"(?m)^[ \t]*import[ \t]+(?:[^'";]*from[ \t]+)?['"](?P<spec>[^'"]+)['"]"#,
                Path,
            )],
            declarations: &[
                (r"(?m)^[ \t]*function[ \t]+(?P<name>\w+)", Function),
                (
                    r"(?m)^[ \t]*(?:abstract[ \t]+)?(?:contract|interface|library|struct)[ \t]+(?P<name>\w+)",
                    Class,
                ),
            ],
            reserved: &[],
        },
        Language::FSharp => RuleSet {
            imports: &[
                (r#"(?m)^[ \t]*#load[ \t]+"(?P<spec>[^"]+)""#, RelativePath),
                (r"(?m)^[ \t]*open[ \t]+(?P<spec>[\w.]+)", Path),
            ],
            declarations: &[
                (
                    r"(?m)^[ \t]*let[ \t]+(?:(?:rec|inline|private)[ \t]+)*(?P<name>[a-z_]\w*)[ \t]+[\w(]",
                    Function,
                ),
                (r"(?m)^[ \t]*type[ \t]+(?P<name>[A-Z]\w*)", Class),
                (
                    r"(?m)^[ \t]*(?:member|override|abstract)[ \t]+(?:\w+\.)?(?P<name>\w+)",
                    Method,
                ),
            ],
            reserved: &["_", "mutable"],
        },
        Language::Elm => RuleSet {
            imports: &[(r"(?m)^import[ \t]+(?P<spec>[A-Z][\w.]*)", Dotted)],
            declarations: &[
                (r"(?m)^(?P<name>[a-z]\w*)[ \t]*:", Function),
                (r"(?m)^type[ \t]+(?:alias[ \t]+)?(?P<name>[A-Z]\w*)", Class),
            ],
            reserved: &["port", "module", "import", "type"],
        },
        Language::Crystal => RuleSet {
            imports: &[(r#"(?m)^[ \t]*require[ \t]+"(?P<spec>[^"]+)""#, Path)],
            declarations: &[
                (
                    r"(?m)^[ \t]*(?:(?:private|protected)[ \t]+)?def[ \t]+(?:self\.)?(?P<name>[\w?!=]+)",
                    Function,
                ),
                (
                    r"(?m)^[ \t]*(?:abstract[ \t]+)?(?:class|struct|module)[ \t]+(?P<name>[\w:]+)",
                    Class,
                ),
            ],
            reserved: &[],
        },
        Language::Groovy => RuleSet {
            imports: &[(
                r"(?m)^[ \t]*import[ \t]+(?:static[ \t]+)?(?P<spec>[\w.]+(?:\.\*)?)",
                Dotted,
            )],
            declarations: &[
                (
                    r"(?m)^[ \t]*(?:(?:public|private|protected|static|final|abstract)[ \t]+)*(?:class|interface|enum|trait)[ \t]+(?P<name>\w+)",
                    Class,
                ),
                (
                    r"(?m)^[ \t]*(?:(?:public|private|protected|static|final)[ \t]+)*def[ \t]+(?P<name>\w+)[ \t]*\(",
                    Function,
                ),
            ],
            reserved: JVM_RESERVED,
        },
    };
    Some(rules)
}
