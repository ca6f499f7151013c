use ndarray::{arr1, Array1, Array2};
use simdvec::interop::{from_matrix, to_matrix};
use simdvec::{vec4, Vec2d, Vec3i, Vec4f, Vector, VectorError};

#[test]
fn test_vector_into_array1() {
    let array: Array1<f32> = vec4(1.0f32, 2.0, 3.0, 4.0).into();
    assert_eq!(array.len(), 4);
    assert_eq!(array.sum(), 10.0);
}

#[test]
fn test_three_lane_vector_has_no_padding_in_array() {
    let array: Array1<i32> = Vec3i::new(7, 8, 9).into();
    assert_eq!(array, arr1(&[7, 8, 9]));
}

#[test]
fn test_matrix_rows_and_columns() {
    let vectors = vec![
        Vec4f::new(1.0, 2.0, 3.0, 4.0),
        Vec4f::new(5.0, 6.0, 7.0, 8.0),
        Vec4f::new(9.0, 10.0, 11.0, 12.0),
    ];
    let matrix = to_matrix(&vectors);
    assert_eq!(matrix.dim(), (3, 4));
    assert_eq!(matrix[[2, 1]], 10.0);

    let column = Vector::<f32, 3>::try_from(matrix.column(3)).unwrap();
    assert_eq!(column, Vector::<_, 3>::new(4.0, 8.0, 12.0));

    let back: Vec<Vec4f> = from_matrix(matrix.view()).unwrap();
    assert_eq!(back, vectors);
}

#[test]
fn test_transposed_view_reads_columns_as_vectors() {
    let matrix = Array2::from_shape_vec((2, 3), vec![1.0, 2.0, 3.0, 4.0, 5.0, 6.0]).unwrap();
    let vectors: Vec<Vec2d> = from_matrix(matrix.t()).unwrap();
    assert_eq!(
        vectors,
        vec![Vec2d::new(1.0, 4.0), Vec2d::new(2.0, 5.0), Vec2d::new(3.0, 6.0)]
    );
}

#[test]
fn test_conversion_errors() {
    let array = arr1(&[1.0, 2.0]);
    assert_eq!(
        Vector::<f64, 3>::try_from(array.view()),
        Err(VectorError::LengthMismatch { expected: 3, found: 2 })
    );

    let matrix = Array2::<f64>::zeros((4, 3));
    let result = from_matrix::<f64, 2>(matrix.view());
    assert_eq!(result, Err(VectorError::LengthMismatch { expected: 2, found: 3 }));
}
