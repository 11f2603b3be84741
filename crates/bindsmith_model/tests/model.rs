use bindsmith_config::GeneratorConfig;
use bindsmith_model::{
    DeclNode, DestructorPolicy, Member, Model, ScopeRef, Severity, Visibility, tree,
};
use bindsmith_ty::TypeCategory;
use indoc::indoc;
use pretty_assertions::assert_eq;

fn build(roots: Vec<DeclNode>) -> Model {
    Model::build(&roots, GeneratorConfig::default())
}

fn member_names(model: &Model, members: &[Member]) -> Vec<String> {
    members
        .iter()
        .map(|m| model.member_name(m).to_string())
        .collect()
}

#[test]
fn test_typedef_alias_resolves_to_same_class() {
    let model = build(vec![
        DeclNode::namespace("cv")
            .child(DeclNode::class("OldName"))
            .child(DeclNode::typedef("NewName", "OldName")),
    ]);
    let cv = model.namespace_id("cv").unwrap();
    let old = model.namespace_class(cv, "OldName").unwrap();
    let new = model.namespace_class(cv, "NewName").unwrap();
    assert!(std::ptr::eq(old, new));
    assert_eq!(old.name(), "OldName");
    assert_eq!(old.aliases(), ["NewName".to_string()]);
}

#[test]
fn test_shortest_alias_is_canonical() {
    let mut size = DeclNode::class("Size_")
        .child(DeclNode::function("Size_"))
        .child(DeclNode::function("area").with_type("int"));
    size.aliases = vec!["Size2i".to_string()];
    let model = build(vec![
        DeclNode::namespace("cv")
            .child(size)
            .child(DeclNode::typedef("Size", "Size_")),
    ]);
    let cv = model.namespace_id("cv").unwrap();
    let class = model.namespace_class(cv, "Size2i").unwrap();
    assert_eq!(class.name(), "Size");
    assert_eq!(class.id_name().as_str(), "cv.Size");

    let ctor = model.constructor(class.id).unwrap();
    let Member::Function { function } = ctor else {
        panic!("expected a single constructor");
    };
    let ctor = model.function(*function).unwrap();
    assert!(ctor.is_constructor);
    assert_eq!(ctor.name, "Size");
    assert_eq!(ctor.id.as_str(), "cv.Size.Size");
    assert_eq!(
        ctor.return_value.as_ref().unwrap().create_type(),
        "cv::Size *"
    );
}

#[test]
fn test_template_instantiation_through_typedef() {
    let template = DeclNode::class("Size_")
        .with_template_params(&["typename _Tp"])
        .child(DeclNode::function("Size_").param("w", "_Tp").param("h", "_Tp"))
        .child(DeclNode::function("area").with_type("_Tp"))
        .child(
            DeclNode::function("hidden")
                .with_type("_Tp")
                .visibility(Visibility::Private),
        );
    let model = build(vec![
        DeclNode::namespace("cv")
            .child(template)
            .child(DeclNode::typedef("Size2i", "Size_<int>"))
            .child(DeclNode::typedef("Size", "Size2i"))
            .child(DeclNode::typedef("Size2f", "Size_<float>"))
            .child(
                DeclNode::function("resize")
                    .param("src", "const Size_<int> &")
                    .param("dst", "Size_<double>"),
            )
            .child(DeclNode::function("scale").param("s", "const Size_<float> &")),
    ]);
    let cv = model.namespace_id("cv").unwrap();
    assert!(model.namespace_class(cv, "Size_").is_none());

    let size = model.namespace_class(cv, "Size2i").unwrap();
    assert_eq!(size.name(), "Size");
    let area = model
        .get_overload(ScopeRef::Class(size.id), "area", 1)
        .unwrap();
    assert_eq!(area.return_value.as_ref().unwrap().full_type.as_str(), "int");
    assert!(model.get(ScopeRef::Class(size.id), "hidden").is_none());
    let by_name = model.get(ScopeRef::Class(size.id), "Size").unwrap();
    let by_alias = model.get(ScopeRef::Class(size.id), "Size2i").unwrap();
    assert_eq!(by_name, model.constructor(size.id).unwrap());
    assert_eq!(by_alias, by_name);
    let ctor = model.get_overload(ScopeRef::Class(size.id), "Size", 1).unwrap();
    assert!(ctor.is_constructor);

    let ns = ScopeRef::Namespace(cv);
    let resize = model.get_overload(ns, "resize", 1).unwrap();
    assert_eq!(resize.arguments[0].full_type.as_str(), "cv::Size");
    assert_eq!(
        resize.arguments[0].category,
        TypeCategory::Opaque(bindsmith_symbol::DottedId::new("cv.Size"))
    );
    // No `Size_<double>` instantiation exists.
    assert!(resize.arguments[1].complex);

    let scale = model.get_overload(ns, "scale", 1).unwrap();
    assert_eq!(scale.arguments[0].full_type.as_str(), "cv::Size2f");

    let bindable = model.bindable_functions(cv);
    assert_eq!(member_names(&model, &bindable), vec!["scale".to_string()]);
    assert!(
        model
            .diagnostics()
            .iter()
            .any(|d| d.message.contains("Size_<double>"))
    );
}

#[test]
fn test_eligibility_of_pointer_types() {
    let model = build(vec![
        DeclNode::namespace("cv").child(
            DeclNode::class("Mat")
                .child(DeclNode::function("fill").param("data", "void *"))
                .child(DeclNode::function("ptr").with_type("uchar *"))
                .child(DeclNode::function("name").with_type("const char *"))
                .child(DeclNode::function("rows").with_type("int"))
                .child(DeclNode::function("~Mat"))
                .child(
                    DeclNode::function("secret")
                        .with_type("int")
                        .visibility(Visibility::Protected),
                ),
        ),
    ]);
    let cv = model.namespace_id("cv").unwrap();
    let mat = model.namespace_class(cv, "Mat").unwrap();
    assert!(model.get(ScopeRef::Class(mat.id), "fill").is_some());
    assert_eq!(
        member_names(&model, model.bindable_members(mat.id)),
        vec!["name".to_string(), "rows".to_string()]
    );
}

#[test]
fn test_filtered_overloads_renumbered() {
    let model = build(vec![
        DeclNode::namespace("cv")
            .child(DeclNode::function("blur").param("a", "int"))
            .child(DeclNode::function("blur").param("data", "void *"))
            .child(DeclNode::function("blur").param("a", "const char *")),
    ]);
    let cv = model.namespace_id("cv").unwrap();
    let ns = ScopeRef::Namespace(cv);
    assert!(model.get_overload(ns, "blur", 3).is_some());

    let bindable = model.bindable_functions(cv);
    let group = bindable[0].as_group().unwrap();
    let indexed: Vec<(usize, usize)> = group.indexed().map(|(idx, f)| (idx, f.index)).collect();
    assert_eq!(indexed, vec![(1, 0), (2, 2)]);
}

#[test]
fn test_group_reduced_to_one_function() {
    let model = build(vec![
        DeclNode::namespace("cv")
            .child(DeclNode::function("blur").param("a", "int"))
            .child(DeclNode::function("blur").param("data", "void *")),
    ]);
    let cv = model.namespace_id("cv").unwrap();
    let bindable = model.bindable_functions(cv);
    assert!(matches!(bindable[0], Member::Function { .. }));
}

#[test]
fn test_inheritance_flattening() {
    let model = build(vec![
        DeclNode::namespace("cv")
            .child(
                DeclNode::class("Algorithm")
                    .child(DeclNode::function("clear"))
                    .child(DeclNode::function("name").with_type("const char *")),
            )
            .child(
                DeclNode::class("Boost")
                    .with_superclasses(&["public cv::Algorithm", "Missing"])
                    .child(DeclNode::function("train").param("n", "int"))
                    .child(DeclNode::function("name").with_type("const char *")),
            ),
    ]);
    let cv = model.namespace_id("cv").unwrap();
    let boost = model.namespace_class(cv, "Boost").unwrap();
    let members = model.bindable_members(boost.id);
    assert_eq!(
        member_names(&model, members),
        vec!["clear".to_string(), "name".to_string(), "train".to_string()]
    );

    // Own `name` hides the inherited one.
    let Member::Function { function } = &members[1] else {
        panic!("expected function");
    };
    assert_eq!(function.class(), Some(boost.id));

    let diagnostics = model.diagnostics();
    assert_eq!(diagnostics.len(), 1);
    assert_eq!(diagnostics[0].severity, Severity::Warning);
    assert!(diagnostics[0].message.contains("superclass `Missing`"));
}

#[test]
fn test_inheritance_cycle_is_reported() {
    let model = build(vec![
        DeclNode::namespace("cv")
            .child(
                DeclNode::class("A")
                    .with_superclasses(&["B"])
                    .child(DeclNode::function("a")),
            )
            .child(
                DeclNode::class("B")
                    .with_superclasses(&["A"])
                    .child(DeclNode::function("b")),
            ),
    ]);
    let cv = model.namespace_id("cv").unwrap();
    let a = model.namespace_class(cv, "A").unwrap();
    assert_eq!(
        member_names(&model, model.bindable_members(a.id)),
        vec!["a".to_string(), "b".to_string()]
    );
    assert!(
        model
            .diagnostics()
            .iter()
            .any(|d| d.message.contains("inheritance cycle"))
    );
}

#[test]
fn test_inheritance_cycle_is_order_independent() {
    let cycle = || {
        build(vec![
            DeclNode::namespace("cv")
                .child(
                    DeclNode::class("A")
                        .with_superclasses(&["B"])
                        .child(DeclNode::function("a")),
                )
                .child(
                    DeclNode::class("B")
                        .with_superclasses(&["C"])
                        .child(DeclNode::function("b")),
                )
                .child(
                    DeclNode::class("C")
                        .with_superclasses(&["A"])
                        .child(DeclNode::function("c")),
                ),
        ])
    };
    let all = vec!["a".to_string(), "b".to_string(), "c".to_string()];
    for first in ["A", "B", "C"] {
        let model = cycle();
        let cv = model.namespace_id("cv").unwrap();
        let id = |name: &str| model.namespace_class(cv, name).unwrap().id;
        model.bindable_members(id(first));
        for name in ["A", "B", "C"] {
            assert_eq!(
                member_names(&model, model.bindable_members(id(name))),
                all,
                "{name} after flattening {first} first"
            );
        }
    }
}

#[test]
fn test_directives_shape_class() {
    let model = build(vec![
        DeclNode::namespace("cv")
            .child(DeclNode::class("Base").child(DeclNode::function("base")))
            .child(
                DeclNode::class("Mat")
                    .with_superclasses(&["Unrelated"])
                    .with_directive(indoc! {"
                        ignore: 'cols, base'
                        destructor: false
                        super: 'Base'
                    "})
                    .child(DeclNode::function("rows").with_type("int"))
                    .child(DeclNode::function("cols").with_type("int")),
            )
            .child(
                DeclNode::class("Broken")
                    .with_directive("constructr: make")
                    .child(DeclNode::function("x")),
            ),
    ]);
    let cv = model.namespace_id("cv").unwrap();
    let mat = model.namespace_class(cv, "Mat").unwrap();
    assert_eq!(mat.destructor(), &DestructorPolicy::None);
    assert_eq!(
        member_names(&model, model.bindable_members(mat.id)),
        vec!["rows".to_string()]
    );

    let broken = model.namespace_class(cv, "Broken").unwrap();
    assert!(!broken.is_bindable());
    assert!(
        model
            .diagnostics()
            .iter()
            .any(|d| d.severity == Severity::Error && d.entity == "cv.Broken")
    );
}

#[test]
fn test_argument_naming_and_defaults() {
    let mut step = DeclNode::function("step")
        .param("", "int")
        .param("step", "size_t")
        .param_with_default("mode", "int", "AUTO_STEP")
        .param_with_default("flags", "int", "NORM_L2");
    step.location = Some(tree::SourceLocation {
        file: "/usr/include/opencv/core/mat.hpp".to_string(),
        line: 12,
    });
    let model = build(vec![
        DeclNode::namespace("cv")
            .child(DeclNode::enumeration("NormTypes", &["NORM_L1", "NORM_L2"]))
            .child(
                DeclNode::class("Mat")
                    .child(DeclNode::enumeration("", &["AUTO_STEP"]))
                    .child(step),
            ),
    ]);
    let cv = model.namespace_id("cv").unwrap();
    let mat = model.namespace_class(cv, "Mat").unwrap();
    let step = model.get_overload(ScopeRef::Class(mat.id), "step", 1).unwrap();
    let names: Vec<&str> = step.arguments.iter().map(|a| a.name.as_str()).collect();
    assert_eq!(names, vec!["arg1", "arg_step", "mode", "flags"]);
    assert_eq!(step.arguments[2].default.as_deref(), Some("cv::Mat::AUTO_STEP"));
    assert_eq!(step.arguments[3].default.as_deref(), Some("cv::NORM_L2"));
    assert!(step.has_default_arguments());
    assert_eq!(step.source().as_deref(), Some("opencv/core/mat.hpp:12"));
    assert_eq!(mat.enums, vec!["AUTO_STEP".to_string()]);
    assert_eq!(model.namespace(cv).enums.len(), 2);
}

#[test]
fn test_malformed_declarator_drops_only_that_function() {
    let model = build(vec![
        DeclNode::namespace("cv")
            .child(DeclNode::function("bad").param("x", "Foo<Bar"))
            .child(DeclNode::function("good").param("x", "double")),
    ]);
    let cv = model.namespace_id("cv").unwrap();
    let ns = ScopeRef::Namespace(cv);
    assert!(model.get(ns, "bad").is_none());
    assert!(model.get(ns, "good").is_some());
    let diagnostics = model.diagnostics();
    assert_eq!(diagnostics.len(), 1);
    assert_eq!(diagnostics[0].entity, "cv.bad");
}

#[test]
fn test_void_return_and_template_members() {
    let mut convert = DeclNode::function("convert").with_type("T");
    convert.template_params = vec!["typename T".to_string()];
    let model = build(vec![
        DeclNode::namespace("cv")
            .child(DeclNode::function("reset").with_type("void"))
            .child(DeclNode::function("data").with_type("void *"))
            .child(convert),
    ]);
    let cv = model.namespace_id("cv").unwrap();
    let ns = ScopeRef::Namespace(cv);
    assert!(model.get_overload(ns, "reset", 1).unwrap().return_value.is_none());
    assert!(model.get_overload(ns, "data", 1).unwrap().return_value.is_some());
    assert!(model.get(ns, "convert").is_none());
    assert_eq!(model.members(ns).template_members.len(), 1);
    assert_eq!(
        member_names(&model, &model.bindable_functions(cv)),
        vec!["reset".to_string()]
    );
}

#[test]
fn test_override_file_loading() {
    let dir = tempfile::tempdir().unwrap();
    std::fs::write(
        dir.path().join("mat.yml"),
        "lua:\n  rows: 'lua_pushnumber(L, 3);\n    return 1;'\n",
    )
    .unwrap();
    let config = GeneratorConfig {
        override_base_dir: Some(dir.path().to_path_buf()),
        ..GeneratorConfig::default()
    };
    let roots = vec![
        DeclNode::namespace("cv")
            .child(DeclNode::class("Mat").with_directive("overrides: 'mat.yml'"))
            .child(DeclNode::class("Vec").with_directive("overrides: 'missing.yml'")),
    ];
    let model = Model::build(&roots, config);
    let cv = model.namespace_id("cv").unwrap();
    let mat = model.namespace_class(cv, "Mat").unwrap();
    assert!(model.overrides(mat.id).body("rows").is_some());

    let vec = model.namespace_class(cv, "Vec").unwrap();
    assert!(model.overrides(vec.id).is_empty());
    assert!(
        model
            .diagnostics()
            .iter()
            .any(|d| d.entity == "cv.Vec" && d.message.contains("missing.yml"))
    );
}

#[test]
fn test_yaml_tree_input() {
    let roots = tree::from_yaml(indoc! {"
        - kind: namespace
          name: outer::inner
          children:
            - kind: class
              name: Widget
              location: { file: include/widget.h, line: 4 }
              children:
                - kind: function
                  name: Widget
                - kind: function
                  name: show
                  type: bool
                  is_const: true
            - kind: define
              name: WIDGET_MAX
    "})
    .unwrap();
    let model = Model::build(&roots, GeneratorConfig::default());
    let outer = model.namespace_id("outer").unwrap();
    let inner = model.namespace_id("outer::inner").unwrap();
    assert_eq!(model.namespace(inner).parent, Some(outer));
    assert_eq!(model.namespace(inner).defines, vec!["WIDGET_MAX".to_string()]);

    let widget = model.namespace_class(inner, "Widget").unwrap();
    assert_eq!(widget.id_name().as_str(), "outer.inner.Widget");
    assert_eq!(widget.header().as_deref(), Some("widget.h"));
    assert!(model.bindable_constructor(widget.id).is_some());
    let show = model.get_overload(ScopeRef::Class(widget.id), "show", 1).unwrap();
    assert!(show.is_const);
    assert_eq!(
        show.return_value.as_ref().unwrap().category,
        TypeCategory::Boolean
    );
}
