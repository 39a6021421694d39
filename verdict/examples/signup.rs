use formdom::{Document, Element};
use simplelog::{ColorChoice, Config, LevelFilter, TermLogger, TerminalMode};
use verdict::sink::LogSink;
use verdict::{Rule, RuleKind, Validator, ValidatorOptions};

fn field(label: &str, id: &str, input: Element) -> Element {
    Element::div().class("form-group").children([
        Element::label(label).label_for(id),
        input.id(id).name(id),
    ])
}

fn choice(kind: &str, name: &str, value: &str, caption: &str) -> Element {
    Element::label(caption).child(Element::input(kind).name(name).value(value))
}

fn signup_form() -> Element {
    Element::form().id("signup").children([
        field(
            "Username",
            "username",
            Element::input("text")
                .required()
                .attr("minlength", "3")
                .attr("maxlength", "20"),
        ),
        field("Email", "email", Element::input("email").required()),
        field(
            "Password",
            "password",
            Element::input("password").required().attr("minlength", "6"),
        ),
        field(
            "Age",
            "age",
            Element::input("number").attr("min", "18").attr("max", "100"),
        ),
        Element::div().class("form-group").children([
            Element::legend("Interests"),
            Element::div().class("checkbox-options").children([
                choice("checkbox", "interests", "sports", "Sports"),
                choice("checkbox", "interests", "music", "Music"),
                choice("checkbox", "interests", "books", "Books"),
                choice("checkbox", "interests", "travel", "Travel"),
            ]),
        ]),
        Element::fieldset().class("form-group").children([
            Element::legend("Delivery"),
            choice("radio", "delivery", "pickup", "Pickup"),
            choice("radio", "delivery", "courier", "Courier"),
            choice("radio", "delivery", "post", "Post"),
        ]),
        Element::button("Sign up"),
    ])
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    TermLogger::init(
        LevelFilter::Info,
        Config::default(),
        TerminalMode::Mixed,
        ColorChoice::Auto,
    )?;

    let mut doc = Document::new(Element::div().id("page").child(signup_form()));
    let form = doc
        .get_element_by_id("signup")
        .ok_or("signup form missing")?;

    let options = ValidatorOptions::default()
        .error_state_class("form-error")
        .success_state_class("form-success");
    let mut validator = Validator::with_sink(&mut doc, form, options, LogSink)?;

    validator.add_field(
        &mut doc,
        "username",
        vec![
            Rule::required().message("Username is required"),
            Rule::min_length(3).message("At least 3 characters"),
            Rule::max_length(20).message("At most 20 characters"),
        ],
    )?;
    validator.add_field(
        &mut doc,
        "email",
        vec![
            Rule::required().message("Email is required"),
            Rule::email().message("Enter a valid email"),
        ],
    )?;
    validator.add_field(
        &mut doc,
        "password",
        vec![
            Rule::required().message("Password is required"),
            Rule::min_length(6).message("Password needs at least 6 characters"),
        ],
    )?;
    validator.add_field(
        &mut doc,
        "age",
        vec![
            Rule::required().message("Age is required"),
            Rule::min(18.0).message("You must be at least 18"),
            Rule::max(100.0).message("Age must be 100 or less"),
        ],
    )?;
    validator.add_field(
        &mut doc,
        "interests",
        vec![
            Rule::min_selected(2).message("Pick at least 2 interests"),
            Rule::max_selected(3).message("Pick at most 3 interests"),
        ],
    )?;
    validator.add_field(
        &mut doc,
        "delivery",
        vec![Rule::required().message("Choose a delivery method")],
    )?;
    validator.set_custom_message("email", RuleKind::Email, "Please enter a real email address");

    // A user fills in part of the form and tries to submit.
    let username = doc.get_element_by_id("username").ok_or("username missing")?;
    let email = doc.get_element_by_id("email").ok_or("email missing")?;
    doc.focus(username);
    doc.type_text(username, "iv");
    doc.focus(email);
    doc.type_text(email, "ivan@example");
    doc.blur(email);

    let outcome = doc.submit(form);
    println!("submit proceeds: {}", outcome.proceeds());
    for (name, messages) in validator.errors(&mut doc) {
        println!("  {name}: {}", messages.join("; "));
    }
    for (name, warnings) in validator.warnings() {
        println!("  advisory for {name}: {}", warnings.join("; "));
    }

    // The user fixes everything and submits again.
    doc.type_text(username, "IvanPetrov");
    doc.type_text(email, "ivan@example.com");
    let password = doc.get_element_by_id("password").ok_or("password missing")?;
    let age = doc.get_element_by_id("age").ok_or("age missing")?;
    doc.type_text(password, "secure123");
    doc.type_text(age, "25");
    let interests = doc.query_name(form, "interests");
    doc.click(interests[0]);
    doc.click(interests[1]);
    let delivery = doc.query_name(form, "delivery");
    doc.click(delivery[1]);

    let outcome = doc.submit(form);
    println!("submit proceeds: {}", outcome.proceeds());
    println!("{}", doc.to_markup(form));

    validator.destroy(&mut doc);
    Ok(())
}
