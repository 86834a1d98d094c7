use uuid::Uuid;

use crate::models::course::{Course, CourseContent, NewContentRequest, NewCourseRequest};
use crate::models::user::{Role, User};
use crate::storage::{trainer_content_key, trainer_courses_key, Storage};
use crate::utils::error::AppError;

const DEFAULT_COURSE_IMAGE: &str = "default-course-image";
const DEFAULT_FILE_URL: &str = "default-file-url";

/// Cria um curso para o trainer da sessão
pub fn create_course<S: Storage>(
    storage: &S,
    user: &User,
    request: &NewCourseRequest,
) -> Result<Course, AppError> {
    if user.role != Role::Trainer {
        return Err(AppError::InvalidRequest(
            "Only trainers can create courses".to_string(),
        ));
    }

    let title = request.title.trim();
    let category = request.category.trim();
    let description = request.description.trim();
    if title.is_empty() || category.is_empty() || description.is_empty() {
        return Err(AppError::InvalidRequest(
            "Title, category and description are required".to_string(),
        ));
    }

    let price = request.price.trim();
    let image = request.image.trim();
    let course = Course {
        id: Uuid::new_v4().to_string(),
        title: title.to_string(),
        category: category.to_string(),
        trainer: user.name.clone(),
        rating: 0.0,
        students: 0,
        price: if price.is_empty() { "Free".to_string() } else { price.to_string() },
        image: if image.is_empty() { DEFAULT_COURSE_IMAGE.to_string() } else { image.to_string() },
        description: description.to_string(),
        url: format!("/course/{}", slugify(title)),
    };

    let key = trainer_courses_key(&user.email);
    let mut courses = load_list::<Course, S>(storage, &key);
    courses.push(course.clone());
    save_list(storage, &key, &courses)?;

    log::info!("📚 Course created: {} ({})", course.title, course.id);
    Ok(course)
}

/// Cursos publicados pelo trainer da sessão
pub fn list_trainer_courses<S: Storage>(storage: &S, user: &User) -> Vec<Course> {
    load_list(storage, &trainer_courses_key(&user.email))
}

/// Anexa conteúdo (PDF, vídeo, áudio) a um curso existente do trainer
pub fn upload_content<S: Storage>(
    storage: &S,
    user: &User,
    request: &NewContentRequest,
) -> Result<CourseContent, AppError> {
    if user.role != Role::Trainer {
        return Err(AppError::InvalidRequest(
            "Only trainers can upload content".to_string(),
        ));
    }

    let courses = list_trainer_courses(storage, user);
    if !courses.iter().any(|c| c.id == request.course_id) {
        return Err(AppError::InvalidRequest(format!(
            "No such course: {}",
            request.course_id
        )));
    }

    let expertise_area = request.expertise_area.trim();
    let file_type = request.file_type.trim();
    if expertise_area.is_empty() || file_type.is_empty() {
        return Err(AppError::InvalidRequest(
            "Expertise area and file type are required".to_string(),
        ));
    }

    let file_url = request.file_url.trim();
    let content = CourseContent {
        id: Uuid::new_v4().to_string(),
        course_id: request.course_id.clone(),
        expertise_area: expertise_area.to_string(),
        file_type: file_type.to_string(),
        file_url: if file_url.is_empty() { DEFAULT_FILE_URL.to_string() } else { file_url.to_string() },
    };

    let key = trainer_content_key(&user.email);
    let mut contents = load_list::<CourseContent, S>(storage, &key);
    contents.push(content.clone());
    save_list(storage, &key, &contents)?;

    log::info!("📎 Content uploaded to course {}", content.course_id);
    Ok(content)
}

/// Conteúdos enviados pelo trainer da sessão
pub fn list_trainer_content<S: Storage>(storage: &S, user: &User) -> Vec<CourseContent> {
    load_list(storage, &trainer_content_key(&user.email))
}

/// Catálogo fixo da página de exploração
pub fn sample_catalog() -> Vec<Course> {
    let entries = [
        (
            "1",
            "Introduction to Web Development",
            "Tech",
            "Jane Doe",
            4.5,
            1200,
            "Free",
            "web-dev",
            "Learn the basics of HTML, CSS, and JavaScript.",
            "https://www.example.com/web-dev-course",
        ),
        (
            "2",
            "Advanced Python Programming",
            "Tech",
            "John Smith",
            4.8,
            850,
            "$49.99",
            "python-course",
            "Master Python with advanced concepts and projects.",
            "https://www.example.com/python-course",
        ),
        (
            "3",
            "Digital Marketing Fundamentals",
            "Business",
            "Alice Brown",
            4.2,
            2500,
            "$29.99",
            "digital-marketing",
            "Understand SEO, SEM, and social media marketing.",
            "https://www.example.com/digital-marketing-course",
        ),
        (
            "4",
            "Graphic Design for Beginners",
            "Creative",
            "Bob Green",
            4.6,
            1500,
            "Free",
            "graphic-design",
            "Learn design principles and tools like Photoshop.",
            "https://www.example.com/graphic-design-course",
        ),
        (
            "5",
            "Data Science with R",
            "Tech",
            "Carol White",
            4.7,
            950,
            "$59.99",
            "data-science",
            "Explore data analysis and visualization using R.",
            "https://www.example.com/data-science-course",
        ),
        (
            "6",
            "Introduction to UI/UX Design",
            "Creative",
            "David Black",
            4.9,
            1800,
            "Free",
            "ui-ux",
            "Learn the fundamentals of user interface and user experience design.",
            "https://www.example.com/ui-ux-course",
        ),
    ];

    entries
        .into_iter()
        .map(
            |(id, title, category, trainer, rating, students, price, image, description, url)| {
                Course {
                    id: id.to_string(),
                    title: title.to_string(),
                    category: category.to_string(),
                    trainer: trainer.to_string(),
                    rating,
                    students,
                    price: price.to_string(),
                    image: image.to_string(),
                    description: description.to_string(),
                    url: url.to_string(),
                }
            },
        )
        .collect()
}

/// "All" + categorias distintas, na ordem em que aparecem
pub fn categories(courses: &[Course]) -> Vec<String> {
    let mut result = vec!["All".to_string()];
    for course in courses {
        if !result.contains(&course.category) {
            result.push(course.category.clone());
        }
    }
    result
}

/// Filtro da exploração: categoria exata + busca no título (case-insensitive)
pub fn filter_catalog<'a>(courses: &'a [Course], category: &str, search: &str) -> Vec<&'a Course> {
    let needle = search.to_lowercase();
    courses
        .iter()
        .filter(|course| {
            (category == "All" || course.category == category)
                && course.title.to_lowercase().contains(&needle)
        })
        .collect()
}

fn slugify(title: &str) -> String {
    title
        .to_lowercase()
        .split_whitespace()
        .collect::<Vec<_>>()
        .join("-")
}

// Per-trainer lists; unreadable stored content counts as empty
fn load_list<T: serde::de::DeserializeOwned, S: Storage>(storage: &S, key: &str) -> Vec<T> {
    match storage.get_item(key) {
        Ok(Some(raw)) => match serde_json::from_str(&raw) {
            Ok(list) => list,
            Err(e) => {
                log::warn!("⚠️  Failed to parse stored list '{}', treating as empty: {}", key, e);
                Vec::new()
            }
        },
        Ok(None) => Vec::new(),
        Err(e) => {
            log::warn!("⚠️  Could not read stored list '{}': {}", key, e);
            Vec::new()
        }
    }
}

fn save_list<T: serde::Serialize, S: Storage>(
    storage: &S,
    key: &str,
    list: &[T],
) -> Result<(), AppError> {
    let raw = serde_json::to_string(list)
        .map_err(|e| AppError::StorageError(format!("Failed to encode '{}': {}", key, e)))?;
    storage.set_item(key, &raw)
}
