//! Built-in knowledge of common JDK types.
//!
//! The table covers the hierarchy and the most used members of
//! `java.lang`, `java.util`, `java.util.function`, `java.io`, `java.math`,
//! `java.nio.file` and `java.time`. Signatures are written in a compact Java-like
//! form and parsed once at start-up. Simple names in signatures denote
//! `java.lang` types; everything else is fully qualified.

use crate::inference::{
    InheritanceProvider, MemberInfo, MemberKind, MemberProvider, ParameterInfo, TypeInfo,
    TypeKind, TypeParameter, TypeProvider, TypeResolutionContext,
};
use once_cell::sync::Lazy;
use std::collections::HashMap;
use varscope_api::models::{PRIMITIVES, TypeRef};

static SHARED: Lazy<JdkTypeSystem> = Lazy::new(JdkTypeSystem::build);

struct Decl {
    fqn: &'static str,
    kind: TypeKind,
    params: &'static [&'static str],
    extends: Option<&'static str>,
    implements: &'static [&'static str],
    members: &'static [&'static str],
}

const fn class(
    fqn: &'static str,
    params: &'static [&'static str],
    extends: Option<&'static str>,
    implements: &'static [&'static str],
    members: &'static [&'static str],
) -> Decl {
    Decl {
        fqn,
        kind: TypeKind::Class,
        params,
        extends,
        implements,
        members,
    }
}

const fn interface(
    fqn: &'static str,
    params: &'static [&'static str],
    extends: &'static [&'static str],
    members: &'static [&'static str],
) -> Decl {
    Decl {
        fqn,
        kind: TypeKind::Interface,
        params,
        extends: None,
        implements: extends,
        members,
    }
}

const NUMBER_MEMBERS: &[&str] = &[
    "int intValue()",
    "long longValue()",
    "double doubleValue()",
    "float floatValue()",
];

static DECLS: &[Decl] = &[
    // java.lang
    class(
        "java.lang.Object",
        &[],
        None,
        &[],
        &[
            "String toString()",
            "boolean equals(Object)",
            "int hashCode()",
            "Class<?> getClass()",
        ],
    ),
    interface("java.lang.CharSequence", &[], &[], &["int length()", "char charAt(int)"]),
    interface("java.lang.Comparable", &["T"], &[], &["int compareTo(T)"]),
    interface("java.lang.Iterable", &["T"], &[], &["java.util.Iterator<T> iterator()"]),
    interface("java.lang.Runnable", &[], &[], &["void run()"]),
    interface("java.lang.AutoCloseable", &[], &[], &["void close()"]),
    interface("java.lang.Cloneable", &[], &[], &[]),
    class(
        "java.lang.String",
        &[],
        Some("Object"),
        &["CharSequence", "Comparable<String>", "java.io.Serializable"],
        &[
            "int length()",
            "char charAt(int)",
            "boolean isEmpty()",
            "boolean isBlank()",
            "String substring(int)",
            "String substring(int, int)",
            "String trim()",
            "String strip()",
            "String toUpperCase()",
            "String toLowerCase()",
            "String concat(String)",
            "String repeat(int)",
            "String replace(CharSequence, CharSequence)",
            "String replace(char, char)",
            "String replaceAll(String, String)",
            "String[] split(String)",
            "boolean contains(CharSequence)",
            "boolean startsWith(String)",
            "boolean endsWith(String)",
            "boolean equalsIgnoreCase(String)",
            "int indexOf(String)",
            "int indexOf(int)",
            "int lastIndexOf(String)",
            "int compareTo(String)",
            "char[] toCharArray()",
            "byte[] getBytes()",
            "String intern()",
            "static String valueOf(Object)",
            "static String valueOf(int)",
            "static String valueOf(long)",
            "static String valueOf(double)",
            "static String valueOf(char)",
            "static String valueOf(boolean)",
            "static String format(String, Object...)",
            "static String join(CharSequence, CharSequence...)",
            "static String join(CharSequence, Iterable<? extends CharSequence>)",
        ],
    ),
    class(
        "java.lang.StringBuilder",
        &[],
        Some("Object"),
        &["CharSequence", "java.io.Serializable"],
        &[
            "StringBuilder append(String)",
            "StringBuilder append(Object)",
            "StringBuilder append(int)",
            "StringBuilder append(long)",
            "StringBuilder append(char)",
            "StringBuilder append(double)",
            "StringBuilder append(boolean)",
            "StringBuilder insert(int, String)",
            "StringBuilder reverse()",
            "StringBuilder deleteCharAt(int)",
            "String toString()",
            "int length()",
            "char charAt(int)",
        ],
    ),
    class(
        "java.lang.Number",
        &[],
        Some("Object"),
        &["java.io.Serializable"],
        NUMBER_MEMBERS,
    ),
    class(
        "java.lang.Integer",
        &[],
        Some("Number"),
        &["Comparable<Integer>"],
        &[
            "static field int MAX_VALUE",
            "static field int MIN_VALUE",
            "static int parseInt(String)",
            "static Integer valueOf(int)",
            "static Integer valueOf(String)",
            "static String toString(int)",
            "static int compare(int, int)",
            "static int max(int, int)",
            "static int min(int, int)",
            "static int sum(int, int)",
        ],
    ),
    class(
        "java.lang.Long",
        &[],
        Some("Number"),
        &["Comparable<Long>"],
        &[
            "static field long MAX_VALUE",
            "static field long MIN_VALUE",
            "static long parseLong(String)",
            "static Long valueOf(long)",
            "static Long valueOf(String)",
            "static String toString(long)",
        ],
    ),
    class(
        "java.lang.Double",
        &[],
        Some("Number"),
        &["Comparable<Double>"],
        &[
            "static field double MAX_VALUE",
            "static double parseDouble(String)",
            "static Double valueOf(double)",
            "static boolean isNaN(double)",
        ],
    ),
    class(
        "java.lang.Float",
        &[],
        Some("Number"),
        &["Comparable<Float>"],
        &["static float parseFloat(String)", "static Float valueOf(float)"],
    ),
    class(
        "java.lang.Short",
        &[],
        Some("Number"),
        &["Comparable<Short>"],
        &["static short parseShort(String)", "static Short valueOf(short)"],
    ),
    class(
        "java.lang.Byte",
        &[],
        Some("Number"),
        &["Comparable<Byte>"],
        &["static byte parseByte(String)", "static Byte valueOf(byte)"],
    ),
    class(
        "java.lang.Character",
        &[],
        Some("Object"),
        &["Comparable<Character>", "java.io.Serializable"],
        &[
            "static boolean isDigit(char)",
            "static boolean isLetter(char)",
            "static boolean isWhitespace(char)",
            "static char toUpperCase(char)",
            "static char toLowerCase(char)",
            "static Character valueOf(char)",
            "char charValue()",
        ],
    ),
    class(
        "java.lang.Boolean",
        &[],
        Some("Object"),
        &["Comparable<Boolean>", "java.io.Serializable"],
        &[
            "static field Boolean TRUE",
            "static field Boolean FALSE",
            "static boolean parseBoolean(String)",
            "static Boolean valueOf(boolean)",
            "boolean booleanValue()",
        ],
    ),
    class(
        "java.lang.Math",
        &[],
        Some("Object"),
        &[],
        &[
            "static field double PI",
            "static int abs(int)",
            "static long abs(long)",
            "static double abs(double)",
            "static int max(int, int)",
            "static long max(long, long)",
            "static double max(double, double)",
            "static int min(int, int)",
            "static long min(long, long)",
            "static double min(double, double)",
            "static double sqrt(double)",
            "static double pow(double, double)",
            "static double random()",
            "static long round(double)",
            "static int round(float)",
            "static double floor(double)",
            "static double ceil(double)",
            "static int floorMod(int, int)",
        ],
    ),
    class(
        "java.lang.System",
        &[],
        Some("Object"),
        &[],
        &[
            "static field java.io.PrintStream out",
            "static field java.io.PrintStream err",
            "static field java.io.InputStream in",
            "static long currentTimeMillis()",
            "static long nanoTime()",
            "static String getProperty(String)",
            "static String getenv(String)",
            "static String lineSeparator()",
            "static int identityHashCode(Object)",
        ],
    ),
    class(
        "java.lang.Thread",
        &[],
        Some("Object"),
        &["Runnable"],
        &[
            "static Thread currentThread()",
            "static void sleep(long)",
            "String getName()",
            "void start()",
            "void join()",
        ],
    ),
    class(
        "java.lang.Class",
        &["T"],
        Some("Object"),
        &["java.io.Serializable"],
        &["String getName()", "String getSimpleName()"],
    ),
    class(
        "java.lang.Enum",
        &["E"],
        Some("Object"),
        &["Comparable<E>", "java.io.Serializable"],
        &["String name()", "int ordinal()"],
    ),
    class(
        "java.lang.Throwable",
        &[],
        Some("Object"),
        &["java.io.Serializable"],
        &["String getMessage()", "Throwable getCause()", "void printStackTrace()"],
    ),
    class("java.lang.Exception", &[], Some("Throwable"), &[], &[]),
    class("java.lang.Error", &[], Some("Throwable"), &[], &[]),
    class("java.lang.RuntimeException", &[], Some("Exception"), &[], &[]),
    class("java.lang.IllegalArgumentException", &[], Some("RuntimeException"), &[], &[]),
    class("java.lang.IllegalStateException", &[], Some("RuntimeException"), &[], &[]),
    class("java.lang.NullPointerException", &[], Some("RuntimeException"), &[], &[]),
    class(
        "java.lang.UnsupportedOperationException",
        &[],
        Some("RuntimeException"),
        &[],
        &[],
    ),
    // java.util
    interface(
        "java.util.Iterator",
        &["E"],
        &[],
        &["boolean hasNext()", "E next()", "void remove()"],
    ),
    interface(
        "java.util.Collection",
        &["E"],
        &["Iterable<E>"],
        &[
            "int size()",
            "boolean isEmpty()",
            "boolean contains(Object)",
            "boolean add(E)",
            "boolean remove(Object)",
            "boolean addAll(java.util.Collection<? extends E>)",
            "void clear()",
            "Object[] toArray()",
            "java.util.stream.Stream<E> stream()",
            "java.util.Iterator<E> iterator()",
        ],
    ),
    interface(
        "java.util.List",
        &["E"],
        &["java.util.Collection<E>"],
        &[
            "E get(int)",
            "E set(int, E)",
            "void add(int, E)",
            "E remove(int)",
            "int indexOf(Object)",
            "java.util.List<E> subList(int, int)",
            "void sort(java.util.Comparator<? super E>)",
            "static <T> java.util.List<T> of(T...)",
            "static <T> java.util.List<T> copyOf(java.util.Collection<? extends T>)",
        ],
    ),
    interface(
        "java.util.Set",
        &["E"],
        &["java.util.Collection<E>"],
        &["static <T> java.util.Set<T> of(T...)"],
    ),
    interface("java.util.SortedSet", &["E"], &["java.util.Set<E>"], &["E first()", "E last()"]),
    interface("java.util.NavigableSet", &["E"], &["java.util.SortedSet<E>"], &[]),
    interface(
        "java.util.Queue",
        &["E"],
        &["java.util.Collection<E>"],
        &["boolean offer(E)", "E poll()", "E peek()"],
    ),
    interface(
        "java.util.Deque",
        &["E"],
        &["java.util.Queue<E>"],
        &["void push(E)", "E pop()", "E peekFirst()", "E peekLast()", "void addFirst(E)"],
    ),
    interface("java.util.RandomAccess", &[], &[], &[]),
    class(
        "java.util.AbstractCollection",
        &["E"],
        Some("Object"),
        &["java.util.Collection<E>"],
        &[],
    ),
    class(
        "java.util.AbstractList",
        &["E"],
        Some("java.util.AbstractCollection<E>"),
        &["java.util.List<E>"],
        &[],
    ),
    class(
        "java.util.ArrayList",
        &["E"],
        Some("java.util.AbstractList<E>"),
        &["java.util.List<E>", "java.util.RandomAccess", "Cloneable", "java.io.Serializable"],
        &["void ensureCapacity(int)", "void trimToSize()"],
    ),
    class(
        "java.util.LinkedList",
        &["E"],
        Some("java.util.AbstractList<E>"),
        &["java.util.List<E>", "java.util.Deque<E>", "Cloneable", "java.io.Serializable"],
        &[],
    ),
    class(
        "java.util.Vector",
        &["E"],
        Some("java.util.AbstractList<E>"),
        &["java.util.List<E>", "java.util.RandomAccess", "Cloneable", "java.io.Serializable"],
        &[],
    ),
    class(
        "java.util.AbstractSet",
        &["E"],
        Some("java.util.AbstractCollection<E>"),
        &["java.util.Set<E>"],
        &[],
    ),
    class(
        "java.util.HashSet",
        &["E"],
        Some("java.util.AbstractSet<E>"),
        &["java.util.Set<E>", "Cloneable", "java.io.Serializable"],
        &[],
    ),
    class(
        "java.util.LinkedHashSet",
        &["E"],
        Some("java.util.HashSet<E>"),
        &["java.util.Set<E>", "Cloneable", "java.io.Serializable"],
        &[],
    ),
    class(
        "java.util.TreeSet",
        &["E"],
        Some("java.util.AbstractSet<E>"),
        &["java.util.NavigableSet<E>", "Cloneable", "java.io.Serializable"],
        &[],
    ),
    class(
        "java.util.ArrayDeque",
        &["E"],
        Some("java.util.AbstractCollection<E>"),
        &["java.util.Deque<E>", "Cloneable", "java.io.Serializable"],
        &[],
    ),
    class(
        "java.util.PriorityQueue",
        &["E"],
        Some("java.util.AbstractCollection<E>"),
        &["java.util.Queue<E>", "java.io.Serializable"],
        &[],
    ),
    interface(
        "java.util.Map",
        &["K", "V"],
        &[],
        &[
            "V get(Object)",
            "V put(K, V)",
            "V remove(Object)",
            "V getOrDefault(Object, V)",
            "V putIfAbsent(K, V)",
            "boolean containsKey(Object)",
            "boolean containsValue(Object)",
            "int size()",
            "boolean isEmpty()",
            "void clear()",
            "java.util.Set<K> keySet()",
            "java.util.Collection<V> values()",
            "java.util.Set<java.util.Map.Entry<K, V>> entrySet()",
            "static <A, B> java.util.Map<A, B> of()",
            "static <A, B> java.util.Map<A, B> of(A, B)",
            "static <A, B> java.util.Map<A, B> of(A, B, A, B)",
        ],
    ),
    interface(
        "java.util.Map.Entry",
        &["K", "V"],
        &[],
        &["K getKey()", "V getValue()", "V setValue(V)"],
    ),
    interface(
        "java.util.SortedMap",
        &["K", "V"],
        &["java.util.Map<K, V>"],
        &["K firstKey()", "K lastKey()"],
    ),
    interface(
        "java.util.NavigableMap",
        &["K", "V"],
        &["java.util.SortedMap<K, V>"],
        &[],
    ),
    class(
        "java.util.AbstractMap",
        &["K", "V"],
        Some("Object"),
        &["java.util.Map<K, V>"],
        &[],
    ),
    class(
        "java.util.HashMap",
        &["K", "V"],
        Some("java.util.AbstractMap<K, V>"),
        &["java.util.Map<K, V>", "Cloneable", "java.io.Serializable"],
        &[],
    ),
    class(
        "java.util.LinkedHashMap",
        &["K", "V"],
        Some("java.util.HashMap<K, V>"),
        &["java.util.Map<K, V>"],
        &[],
    ),
    class(
        "java.util.TreeMap",
        &["K", "V"],
        Some("java.util.AbstractMap<K, V>"),
        &["java.util.NavigableMap<K, V>", "Cloneable", "java.io.Serializable"],
        &[],
    ),
    class(
        "java.util.concurrent.ConcurrentHashMap",
        &["K", "V"],
        Some("java.util.AbstractMap<K, V>"),
        &["java.util.Map<K, V>", "java.io.Serializable"],
        &[],
    ),
    interface("java.util.Comparator", &["T"], &[], &["int compare(T, T)"]),
    class(
        "java.util.Optional",
        &["T"],
        Some("Object"),
        &[],
        &[
            "T get()",
            "T orElse(T)",
            "T orElseThrow()",
            "boolean isPresent()",
            "boolean isEmpty()",
            "static <U> java.util.Optional<U> of(U)",
            "static <U> java.util.Optional<U> ofNullable(U)",
            "static <U> java.util.Optional<U> empty()",
        ],
    ),
    class(
        "java.util.Objects",
        &[],
        Some("Object"),
        &[],
        &[
            "static <T> T requireNonNull(T)",
            "static <T> T requireNonNull(T, String)",
            "static <T> T requireNonNullElse(T, T)",
            "static boolean equals(Object, Object)",
            "static boolean isNull(Object)",
            "static boolean nonNull(Object)",
            "static int hash(Object...)",
            "static int hashCode(Object)",
            "static String toString(Object)",
        ],
    ),
    class(
        "java.util.Collections",
        &[],
        Some("Object"),
        &[],
        &[
            "static <T> java.util.List<T> emptyList()",
            "static <T> java.util.Set<T> emptySet()",
            "static <A, B> java.util.Map<A, B> emptyMap()",
            "static <T> java.util.List<T> singletonList(T)",
            "static <T> java.util.List<T> unmodifiableList(java.util.List<? extends T>)",
            "static <T> java.util.Set<T> unmodifiableSet(java.util.Set<? extends T>)",
            "static <A, B> java.util.Map<A, B> unmodifiableMap(java.util.Map<? extends A, ? extends B>)",
            "static void sort(java.util.List<?>)",
            "static void reverse(java.util.List<?>)",
        ],
    ),
    class(
        "java.util.Arrays",
        &[],
        Some("Object"),
        &[],
        &[
            "static <T> java.util.List<T> asList(T...)",
            "static String toString(Object[])",
            "static String toString(int[])",
            "static void sort(int[])",
            "static void sort(Object[])",
            "static void fill(int[], int)",
            "static int[] copyOf(int[], int)",
        ],
    ),
    class(
        "java.util.Random",
        &[],
        Some("Object"),
        &["java.io.Serializable"],
        &[
            "int nextInt()",
            "int nextInt(int)",
            "long nextLong()",
            "double nextDouble()",
            "boolean nextBoolean()",
        ],
    ),
    class(
        "java.util.Scanner",
        &[],
        Some("Object"),
        &["java.io.Closeable", "java.util.Iterator<String>"],
        &["String nextLine()", "String next()", "int nextInt()", "boolean hasNextLine()"],
    ),
    class(
        "java.util.UUID",
        &[],
        Some("Object"),
        &["Comparable<java.util.UUID>", "java.io.Serializable"],
        &["static java.util.UUID randomUUID()", "static java.util.UUID fromString(String)"],
    ),
    // java.util.function
    interface("java.util.function.Function", &["T", "R"], &[], &["R apply(T)"]),
    interface("java.util.function.BiFunction", &["T", "U", "R"], &[], &["R apply(T, U)"]),
    interface("java.util.function.Supplier", &["T"], &[], &["T get()"]),
    interface("java.util.function.Consumer", &["T"], &[], &["void accept(T)"]),
    interface("java.util.function.BiConsumer", &["T", "U"], &[], &["void accept(T, U)"]),
    interface("java.util.function.Predicate", &["T"], &[], &["boolean test(T)"]),
    interface(
        "java.util.function.UnaryOperator",
        &["T"],
        &["java.util.function.Function<T, T>"],
        &[],
    ),
    // java.util.stream
    interface("java.util.stream.BaseStream", &["T", "S"], &["AutoCloseable"], &[]),
    interface(
        "java.util.stream.Stream",
        &["T"],
        &["java.util.stream.BaseStream<T, java.util.stream.Stream<T>>"],
        &[
            "long count()",
            "java.util.stream.Stream<T> filter(java.util.function.Predicate<? super T>)",
            "java.util.stream.Stream<T> distinct()",
            "java.util.stream.Stream<T> sorted()",
            "java.util.stream.Stream<T> limit(long)",
            "java.util.List<T> toList()",
            "java.util.Optional<T> findFirst()",
            "boolean anyMatch(java.util.function.Predicate<? super T>)",
            "void forEach(java.util.function.Consumer<? super T>)",
            "static <U> java.util.stream.Stream<U> of(U...)",
            "static <U> java.util.stream.Stream<U> empty()",
        ],
    ),
    // java.io
    interface("java.io.Serializable", &[], &[], &[]),
    interface("java.io.Closeable", &[], &["AutoCloseable"], &["void close()"]),
    interface("java.io.Flushable", &[], &[], &["void flush()"]),
    class(
        "java.io.File",
        &[],
        Some("Object"),
        &["java.io.Serializable", "Comparable<java.io.File>"],
        &[
            "String getName()",
            "String getPath()",
            "String getAbsolutePath()",
            "boolean exists()",
            "boolean isDirectory()",
            "boolean delete()",
            "long length()",
            "java.io.File getParentFile()",
            "java.io.File[] listFiles()",
            "java.nio.file.Path toPath()",
        ],
    ),
    class(
        "java.io.InputStream",
        &[],
        Some("Object"),
        &["java.io.Closeable"],
        &["int read()", "byte[] readAllBytes()"],
    ),
    class(
        "java.io.OutputStream",
        &[],
        Some("Object"),
        &["java.io.Closeable", "java.io.Flushable"],
        &["void write(int)", "void write(byte[])"],
    ),
    class("java.io.FileInputStream", &[], Some("java.io.InputStream"), &[], &[]),
    class("java.io.FileOutputStream", &[], Some("java.io.OutputStream"), &[], &[]),
    class(
        "java.io.ByteArrayOutputStream",
        &[],
        Some("java.io.OutputStream"),
        &[],
        &["byte[] toByteArray()", "int size()"],
    ),
    class(
        "java.io.PrintStream",
        &[],
        Some("java.io.OutputStream"),
        &[],
        &[
            "void println()",
            "void println(String)",
            "void println(Object)",
            "void println(int)",
            "void print(String)",
            "void print(Object)",
            "java.io.PrintStream printf(String, Object...)",
        ],
    ),
    class(
        "java.io.Reader",
        &[],
        Some("Object"),
        &["java.io.Closeable"],
        &["int read()"],
    ),
    class("java.io.InputStreamReader", &[], Some("java.io.Reader"), &[], &[]),
    class("java.io.FileReader", &[], Some("java.io.InputStreamReader"), &[], &[]),
    class("java.io.StringReader", &[], Some("java.io.Reader"), &[], &[]),
    class(
        "java.io.BufferedReader",
        &[],
        Some("java.io.Reader"),
        &[],
        &["String readLine()", "java.util.stream.Stream<String> lines()"],
    ),
    class(
        "java.io.Writer",
        &[],
        Some("Object"),
        &["java.io.Closeable", "java.io.Flushable"],
        &["void write(String)"],
    ),
    class("java.io.OutputStreamWriter", &[], Some("java.io.Writer"), &[], &[]),
    class("java.io.FileWriter", &[], Some("java.io.OutputStreamWriter"), &[], &[]),
    class(
        "java.io.StringWriter",
        &[],
        Some("java.io.Writer"),
        &[],
        &["String toString()"],
    ),
    class(
        "java.io.BufferedWriter",
        &[],
        Some("java.io.Writer"),
        &[],
        &["void newLine()"],
    ),
    class(
        "java.io.PrintWriter",
        &[],
        Some("java.io.Writer"),
        &[],
        &["void println(String)", "void print(String)"],
    ),
    class("java.io.IOException", &[], Some("Exception"), &[], &[]),
    class("java.io.UncheckedIOException", &[], Some("RuntimeException"), &[], &[]),
    // java.math
    class(
        "java.math.BigDecimal",
        &[],
        Some("Number"),
        &["Comparable<java.math.BigDecimal>"],
        &[
            "static field java.math.BigDecimal ZERO",
            "static field java.math.BigDecimal ONE",
            "static field java.math.BigDecimal TEN",
            "static java.math.BigDecimal valueOf(long)",
            "static java.math.BigDecimal valueOf(double)",
            "java.math.BigDecimal add(java.math.BigDecimal)",
            "java.math.BigDecimal subtract(java.math.BigDecimal)",
            "java.math.BigDecimal multiply(java.math.BigDecimal)",
            "java.math.BigDecimal negate()",
            "int scale()",
        ],
    ),
    class(
        "java.math.BigInteger",
        &[],
        Some("Number"),
        &["Comparable<java.math.BigInteger>"],
        &[
            "static field java.math.BigInteger ZERO",
            "static field java.math.BigInteger ONE",
            "static java.math.BigInteger valueOf(long)",
            "java.math.BigInteger add(java.math.BigInteger)",
            "java.math.BigInteger multiply(java.math.BigInteger)",
        ],
    ),
    // java.nio.file
    interface(
        "java.nio.file.Path",
        &[],
        &["Comparable<java.nio.file.Path>", "Iterable<java.nio.file.Path>"],
        &[
            "java.nio.file.Path getFileName()",
            "java.nio.file.Path getParent()",
            "java.nio.file.Path resolve(String)",
            "java.nio.file.Path toAbsolutePath()",
            "java.io.File toFile()",
            "static java.nio.file.Path of(String, String...)",
        ],
    ),
    class(
        "java.nio.file.Paths",
        &[],
        Some("Object"),
        &[],
        &["static java.nio.file.Path get(String, String...)"],
    ),
    class(
        "java.nio.file.Files",
        &[],
        Some("Object"),
        &[],
        &[
            "static java.util.List<String> readAllLines(java.nio.file.Path)",
            "static String readString(java.nio.file.Path)",
            "static byte[] readAllBytes(java.nio.file.Path)",
            "static boolean isDirectory(java.nio.file.Path)",
            "static long size(java.nio.file.Path)",
            "static java.io.BufferedReader newBufferedReader(java.nio.file.Path)",
            "static java.io.BufferedWriter newBufferedWriter(java.nio.file.Path)",
            "static java.util.stream.Stream<String> lines(java.nio.file.Path)",
        ],
    ),
    // java.time
    class(
        "java.time.LocalDate",
        &[],
        Some("Object"),
        &["java.io.Serializable"],
        &[
            "static java.time.LocalDate now()",
            "static java.time.LocalDate of(int, int, int)",
            "java.time.LocalDate plusDays(long)",
            "java.time.LocalDate minusDays(long)",
            "int getYear()",
            "int getDayOfMonth()",
        ],
    ),
    class(
        "java.time.Instant",
        &[],
        Some("Object"),
        &["java.io.Serializable"],
        &[
            "static java.time.Instant now()",
            "long toEpochMilli()",
            "java.time.Instant plusSeconds(long)",
        ],
    ),
    class(
        "java.time.Duration",
        &[],
        Some("Object"),
        &["java.io.Serializable"],
        &[
            "static java.time.Duration ofSeconds(long)",
            "static java.time.Duration ofMillis(long)",
            "long toMillis()",
            "long getSeconds()",
        ],
    ),
];

/// Type system over the built-in JDK table.
pub struct JdkTypeSystem {
    types: HashMap<String, TypeInfo>,
    supertypes: HashMap<String, (Option<TypeRef>, Vec<TypeRef>)>,
    members: HashMap<String, Vec<MemberInfo>>,
}

impl JdkTypeSystem {
    /// Process-wide instance; built on first use.
    pub fn shared() -> &'static JdkTypeSystem {
        &SHARED
    }

    pub fn knows(&self, fqn: &str) -> bool {
        self.types.contains_key(fqn)
    }

    fn build() -> Self {
        let mut types = HashMap::new();
        let mut supertypes = HashMap::new();
        let mut members = HashMap::new();

        for decl in DECLS {
            let params: Vec<String> = decl.params.iter().map(|p| p.to_string()).collect();
            types.insert(
                decl.fqn.to_string(),
                TypeInfo {
                    fqn: decl.fqn.to_string(),
                    kind: decl.kind,
                    modifiers: vec!["public".to_string()],
                    type_parameters: params.iter().map(TypeParameter::unbounded).collect(),
                },
            );

            let superclass = decl
                .extends
                .and_then(|s| parse_signature_type(s, &params));
            let interfaces = decl
                .implements
                .iter()
                .filter_map(|s| parse_signature_type(s, &params))
                .collect();
            supertypes.insert(decl.fqn.to_string(), (superclass, interfaces));

            let parsed = decl
                .members
                .iter()
                .filter_map(|sig| {
                    let member = parse_member(decl.fqn, &params, sig);
                    if member.is_none() {
                        tracing::warn!(owner = decl.fqn, signature = *sig, "skipping malformed JDK signature");
                    }
                    member
                })
                .collect::<Vec<_>>();
            members.insert(decl.fqn.to_string(), parsed);
        }

        Self {
            types,
            supertypes,
            members,
        }
    }
}

impl TypeProvider for JdkTypeSystem {
    fn get_type_info(&self, fqn: &str) -> Option<TypeInfo> {
        self.types.get(fqn).cloned()
    }

    fn resolve_type_name(&self, type_name: &str, ctx: &TypeResolutionContext) -> Option<String> {
        super::heuristic::HeuristicAdapter.resolve_type_name(type_name, ctx)
    }
}

impl InheritanceProvider for JdkTypeSystem {
    fn get_superclass(&self, fqn: &str) -> Option<TypeRef> {
        self.supertypes.get(fqn).and_then(|(sup, _)| sup.clone())
    }

    fn get_interfaces(&self, fqn: &str) -> Vec<TypeRef> {
        self.supertypes
            .get(fqn)
            .map(|(_, ifaces)| ifaces.clone())
            .unwrap_or_default()
    }
}

impl MemberProvider for JdkTypeSystem {
    fn get_members(&self, type_fqn: &str, member_name: &str) -> Vec<MemberInfo> {
        self.members
            .get(type_fqn)
            .map(|ms| ms.iter().filter(|m| m.name == member_name).cloned().collect())
            .unwrap_or_default()
    }

    fn get_all_members(&self, type_fqn: &str) -> Vec<MemberInfo> {
        self.members.get(type_fqn).cloned().unwrap_or_default()
    }
}

/// Split on commas that are not nested inside `<...>`.
fn split_top_level(text: &str) -> Vec<&str> {
    let mut parts = Vec::new();
    let mut depth = 0i32;
    let mut start = 0;
    for (i, ch) in text.char_indices() {
        match ch {
            '<' => depth += 1,
            '>' => depth -= 1,
            ',' if depth == 0 => {
                parts.push(text[start..i].trim());
                start = i + 1;
            }
            _ => {}
        }
    }
    let last = text[start..].trim();
    if !last.is_empty() {
        parts.push(last);
    }
    parts
}

fn matching_angle(text: &str) -> Option<usize> {
    let mut depth = 0i32;
    for (i, ch) in text.char_indices() {
        match ch {
            '<' => depth += 1,
            '>' => {
                depth -= 1;
                if depth == 0 {
                    return Some(i);
                }
            }
            _ => {}
        }
    }
    None
}

fn qualify(name: &str, vars: &[String]) -> TypeRef {
    if PRIMITIVES.contains(&name) || name == "void" {
        TypeRef::raw(name)
    } else if vars.iter().any(|v| v == name) || name.contains('.') {
        TypeRef::id(name)
    } else {
        TypeRef::Id(format!("java.lang.{name}"))
    }
}

/// Parse a signature type such as `java.util.Map<K, java.util.List<V>>[]`.
pub(crate) fn parse_signature_type(text: &str, vars: &[String]) -> Option<TypeRef> {
    let text = text.trim();
    if text.is_empty() {
        return None;
    }
    if text == "?" {
        return Some(TypeRef::Wildcard {
            bound: None,
            is_upper_bound: true,
        });
    }
    if let Some(bound) = text.strip_prefix("? extends ") {
        return Some(TypeRef::Wildcard {
            bound: Some(Box::new(parse_signature_type(bound, vars)?)),
            is_upper_bound: true,
        });
    }
    if let Some(bound) = text.strip_prefix("? super ") {
        return Some(TypeRef::Wildcard {
            bound: Some(Box::new(parse_signature_type(bound, vars)?)),
            is_upper_bound: false,
        });
    }
    if let Some(element) = text.strip_suffix("[]") {
        return Some(TypeRef::array_of(parse_signature_type(element, vars)?, 1));
    }
    if let Some(open) = text.find('<') {
        let inner = text.strip_suffix('>')?.get(open + 1..)?;
        let args = split_top_level(inner)
            .into_iter()
            .map(|arg| parse_signature_type(arg, vars))
            .collect::<Option<Vec<_>>>()?;
        return Some(TypeRef::Generic {
            base: Box::new(qualify(text[..open].trim(), vars)),
            args,
        });
    }
    Some(qualify(text, vars))
}

fn parse_member(owner: &str, class_params: &[String], sig: &str) -> Option<MemberInfo> {
    let mut rest = sig.trim();
    let mut modifiers = vec!["public".to_string()];
    let mut is_field = false;
    loop {
        if let Some(r) = rest.strip_prefix("static ") {
            modifiers.push("static".to_string());
            rest = r.trim_start();
        } else if let Some(r) = rest.strip_prefix("field ") {
            is_field = true;
            rest = r.trim_start();
        } else {
            break;
        }
    }

    let mut method_vars = Vec::new();
    if rest.starts_with('<') {
        let close = matching_angle(rest)?;
        method_vars = split_top_level(&rest[1..close])
            .into_iter()
            .filter_map(|v| v.split_whitespace().next().map(str::to_string))
            .collect();
        rest = rest[close + 1..].trim_start();
    }

    let mut vars = class_params.to_vec();
    vars.extend(method_vars.iter().cloned());

    if is_field {
        let (ty, name) = rest.rsplit_once(' ')?;
        return Some(MemberInfo {
            name: name.to_string(),
            fqn: format!("{owner}#{name}"),
            kind: MemberKind::Field,
            declaring_type: owner.to_string(),
            type_ref: parse_signature_type(ty, &vars)?,
            parameters: None,
            modifiers,
            type_parameters: Vec::new(),
        });
    }

    let open = rest.find('(')?;
    let close = rest.rfind(')')?;
    let (ret, name) = rest[..open].trim().rsplit_once(' ')?;
    let mut parameters = Vec::new();
    for (i, param) in split_top_level(&rest[open + 1..close]).into_iter().enumerate() {
        let (base, is_varargs) = match param.strip_suffix("...") {
            Some(base) => (base, true),
            None => (param, false),
        };
        let mut type_ref = parse_signature_type(base, &vars)?;
        if is_varargs {
            type_ref = TypeRef::array_of(type_ref, 1);
        }
        parameters.push(ParameterInfo {
            name: format!("arg{i}"),
            type_ref,
            is_varargs,
        });
    }

    Some(MemberInfo {
        name: name.to_string(),
        fqn: format!("{owner}#{name}"),
        kind: MemberKind::Method,
        declaring_type: owner.to_string(),
        type_ref: parse_signature_type(ret, &vars)?,
        parameters: Some(parameters),
        modifiers,
        type_parameters: method_vars,
    })
}
